/// Implements [`Introspect`] for a type from a member-registration
/// expression.
///
/// The macro takes the type, the name to report in diagnostics, and a
/// closure-shaped expression that receives a [`TypeInfo`] builder and must
/// return the finished table. The table is built once, on first use, and
/// shared for the lifetime of the process, which satisfies the
/// [`Introspect`] contract automatically.
///
/// [`Introspect`]: crate::Introspect
/// [`TypeInfo`]: crate::TypeInfo
///
/// # Examples
///
/// ```
/// use shapecast::impl_introspect;
///
/// struct Sensor {
///     id: u32,
///     label: String,
/// }
///
/// impl Sensor {
///     fn display_name(&self) -> String {
///         format!("{} (#{})", self.label, self.id)
///     }
/// }
///
/// impl_introspect!(Sensor, "Sensor", |b| b
///     .field("id", |s: &Sensor| &s.id)
///     .field("label", |s: &Sensor| &s.label)
///     .property("display_name", Sensor::display_name)
///     .finish());
/// ```
#[macro_export]
macro_rules! impl_introspect {
    ($ty:ty, $name:literal, |$builder:ident| $body:expr) => {
        impl $crate::Introspect for $ty {
            fn static_type_info() -> &'static $crate::TypeInfo {
                static INFO: $crate::__private::Once<$crate::TypeInfo> =
                    $crate::__private::Once::new();
                INFO.call_once(|| {
                    let $builder = $crate::TypeInfo::builder::<$ty>($name);
                    $body
                })
            }

            fn type_info(&self) -> &'static $crate::TypeInfo {
                <$ty as $crate::Introspect>::static_type_info()
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    };
}

/// Implements [`Shape`] for a type from a member-declaration expression.
///
/// The macro takes the type, the name to report in diagnostics, and a
/// closure-shaped expression that receives a [`ShapeDescriptor`] builder
/// and must return the finished descriptor. The descriptor is built once,
/// on first use, and shared for the lifetime of the process.
///
/// The constructor passed to `finish` must consume its [`Slots`] in
/// declaration order.
///
/// [`Shape`]: crate::Shape
/// [`ShapeDescriptor`]: crate::ShapeDescriptor
/// [`Slots`]: crate::Slots
///
/// # Examples
///
/// ```
/// use shapecast::impl_shape;
///
/// struct SensorView {
///     id: u32,
///     display_name: String,
/// }
///
/// impl_shape!(SensorView, "SensorView", |b| b
///     .value::<u32>("id")
///     .value::<String>("display_name")
///     .finish(|slots| SensorView {
///         id: slots.take(),
///         display_name: slots.take(),
///     }));
/// ```
#[macro_export]
macro_rules! impl_shape {
    ($ty:ty, $name:literal, |$builder:ident| $body:expr) => {
        impl $crate::Shape for $ty {
            fn descriptor() -> &'static $crate::ShapeDescriptor {
                static DESCRIPTOR: $crate::__private::Once<$crate::ShapeDescriptor> =
                    $crate::__private::Once::new();
                DESCRIPTOR.call_once(|| {
                    let $builder = $crate::ShapeDescriptor::builder::<$ty>($name);
                    $body
                })
            }
        }
    };
}
