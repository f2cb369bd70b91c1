use alloc::{boxed::Box, vec::Vec};
use core::any::Any;

/// The values read out of a source object for one projection, handed to
/// the shape's constructor for consumption.
///
/// Values sit in declaration order. The constructor calls
/// [`take`](Slots::take) once per declared member, in that order, with
/// the declared target type. For nested members the value is the already
/// constructed nested shape.
pub struct Slots {
    values: alloc::vec::IntoIter<Box<dyn Any>>,
}

impl Slots {
    pub(crate) fn new(values: Vec<Box<dyn Any>>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Takes ownership of the next value.
    ///
    /// # Panics
    ///
    /// Panics when called more times than the shape declares members, or
    /// with a type other than the declared type of the next member. Both
    /// indicate a constructor that diverged from its shape declaration.
    pub fn take<T: 'static>(&mut self) -> T {
        let value = self
            .values
            .next()
            .expect("shape constructor took more values than the shape declares");
        match value.downcast::<T>() {
            Ok(value) => *value,
            Err(_) => panic!(
                "shape constructor took a value as {}, which is not the declared type of the next member",
                core::any::type_name::<T>()
            ),
        }
    }

    /// Whether every value has been taken. The plan executor checks this
    /// after the constructor returns, so a constructor that silently skips
    /// declared members is caught like the over-taking cases above.
    pub(crate) fn is_drained(&self) -> bool {
        self.values.as_slice().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec};

    use super::*;

    #[test]
    fn values_come_out_in_order() {
        let mut slots = Slots::new(vec![
            Box::new(String::from("first")) as Box<dyn Any>,
            Box::new(2u8) as Box<dyn Any>,
        ]);

        assert_eq!(slots.take::<String>(), "first");
        assert_eq!(slots.take::<u8>(), 2);
    }

    #[test]
    fn drained_only_once_every_value_is_taken() {
        let mut slots = Slots::new(vec![Box::new(1u8) as Box<dyn Any>]);
        assert!(!slots.is_drained());
        let _: u8 = slots.take();
        assert!(slots.is_drained());
    }

    #[test]
    #[should_panic(expected = "more values than the shape declares")]
    fn taking_past_the_end_panics() {
        let mut slots = Slots::new(vec![]);
        let _: u8 = slots.take();
    }

    #[test]
    #[should_panic(expected = "not the declared type of the next member")]
    fn taking_the_wrong_type_panics() {
        let mut slots = Slots::new(vec![Box::new(1u8) as Box<dyn Any>]);
        let _: u16 = slots.take();
    }
}
