#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

#[repr(transparent)]
pub(crate) struct CacheLock<T: 'static + Send + Sync>(impl_::RwLock<T>);

#[repr(transparent)]
pub(crate) struct CacheLockReadGuard<T: 'static + Send + Sync>(impl_::RwLockReadGuard<'static, T>);

#[repr(transparent)]
pub(crate) struct CacheLockWriteGuard<T: 'static + Send + Sync>(
    impl_::RwLockWriteGuard<'static, T>,
);

impl<T: 'static + Send + Sync> CacheLock<T> {
    #[must_use]
    pub(crate) const fn new(value: T) -> Self {
        Self(impl_::RwLock::new(value))
    }

    #[inline]
    pub(crate) fn read(&'static self) -> CacheLockReadGuard<T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        #[cfg(feature = "std")]
        let guard = self.0.read().expect("Unable to acquire cache lock");

        CacheLockReadGuard(guard)
    }

    #[inline]
    pub(crate) fn write(&'static self) -> CacheLockWriteGuard<T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.write();

        #[cfg(feature = "std")]
        let guard = self.0.write().expect("Unable to acquire cache lock");

        CacheLockWriteGuard(guard)
    }
}

impl<T: 'static + Send + Sync> CacheLockReadGuard<T> {
    #[inline]
    pub(crate) fn get(&self) -> &T {
        &self.0
    }
}

impl<T: 'static + Send + Sync> CacheLockWriteGuard<T> {
    #[inline]
    pub(crate) fn get(&mut self) -> &mut T {
        &mut self.0
    }
}
