//! Integration tests for the shapecast-internals crate.
//!
//! These exercise the full member-table surface through the same erased
//! call paths the projection engine uses:
//!
//! - `TypeInfo` construction, identity, and member lookup (including the
//!   field-over-property preference for shared names)
//! - value reads through `MemberInfo::read_value` for fields and computed
//!   members, including the wrong-source-type and wrong-capability `None`
//!   cases
//! - object reads through `MemberInfo::read_object` for both borrowed
//!   fields and owned getter results
//! - everything reachable with only a `&dyn Introspect` in hand

use std::any::{Any, TypeId};
use std::sync::OnceLock;

use shapecast_internals::{Introspect, MemberKind, ObjectHandle, TypeInfo};

// Test source types

#[derive(Debug, Clone, PartialEq)]
struct Engine {
    cylinders: u32,
    displacement_cc: u32,
}

impl Introspect for Engine {
    fn static_type_info() -> &'static TypeInfo {
        static INFO: OnceLock<TypeInfo> = OnceLock::new();
        INFO.get_or_init(|| {
            TypeInfo::builder::<Engine>("Engine")
                .field("cylinders", |e: &Engine| &e.cylinders)
                .field("displacement_cc", |e: &Engine| &e.displacement_cc)
                .finish()
        })
    }

    fn type_info(&self) -> &'static TypeInfo {
        Self::static_type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Car {
    model: String,
    doors: u8,
    engine: Engine,
}

impl Car {
    fn description(&self) -> String {
        format!("{} ({} doors)", self.model, self.doors)
    }
}

impl Introspect for Car {
    fn static_type_info() -> &'static TypeInfo {
        static INFO: OnceLock<TypeInfo> = OnceLock::new();
        INFO.get_or_init(|| {
            TypeInfo::builder::<Car>("Car")
                .field("model", |c: &Car| &c.model)
                .field("doors", |c: &Car| &c.doors)
                .property("description", Car::description)
                .object_field("engine", |c: &Car| &c.engine)
                .object_property("spare_engine", |c: &Car| Engine {
                    cylinders: c.engine.cylinders,
                    displacement_cc: c.engine.displacement_cc / 2,
                })
                .finish()
        })
    }

    fn type_info(&self) -> &'static TypeInfo {
        Self::static_type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// A type registering both a field and a computed member under the same
// name, to pin down lookup preference.
struct Shadowed {
    value: i32,
}

impl Introspect for Shadowed {
    fn static_type_info() -> &'static TypeInfo {
        static INFO: OnceLock<TypeInfo> = OnceLock::new();
        INFO.get_or_init(|| {
            TypeInfo::builder::<Shadowed>("Shadowed")
                .property("value", |s: &Shadowed| s.value * 10)
                .field("value", |s: &Shadowed| &s.value)
                .finish()
        })
    }

    fn type_info(&self) -> &'static TypeInfo {
        Self::static_type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn test_car() -> Car {
    Car {
        model: "Fastback".to_owned(),
        doors: 2,
        engine: Engine {
            cylinders: 8,
            displacement_cc: 4600,
        },
    }
}

// TypeInfo tests

#[test]
fn test_type_info_identity() {
    let info = Car::static_type_info();

    assert_eq!(info.type_id(), TypeId::of::<Car>());
    assert_eq!(info.type_name(), "Car");

    // The static and instance paths must agree on the same table.
    let car = test_car();
    assert!(std::ptr::eq(car.type_info(), info));
}

#[test]
fn test_members_preserve_registration_order() {
    let info = Car::static_type_info();
    let names: Vec<&str> = info.members().iter().map(|m| m.name()).collect();

    assert_eq!(
        names,
        ["model", "doors", "description", "engine", "spare_engine"]
    );
}

#[test]
fn test_member_lookup_by_name() {
    let info = Car::static_type_info();

    let (index, member) = info.member("doors").unwrap();
    assert_eq!(index, 1);
    assert_eq!(member.name(), "doors");
    assert_eq!(member.kind(), MemberKind::Field);
    assert_eq!(member.value_type(), TypeId::of::<u8>());

    // The returned index round-trips through member_at.
    assert_eq!(info.member_at(index).name(), "doors");

    assert!(info.member("no_such_member").is_none());
}

#[test]
fn test_member_lookup_prefers_fields() {
    let info = Shadowed::static_type_info();

    // The computed member was registered first, but the field wins.
    let (index, member) = info.member("value").unwrap();
    assert_eq!(index, 1);
    assert_eq!(member.kind(), MemberKind::Field);

    let shadowed = Shadowed { value: 7 };
    let value = member.read_value(shadowed.as_any()).unwrap();
    assert_eq!(*value.downcast::<i32>().unwrap(), 7);
}

#[test]
fn test_member_metadata() {
    let info = Car::static_type_info();

    let (_, description) = info.member("description").unwrap();
    assert_eq!(description.kind(), MemberKind::Property);
    assert_eq!(description.value_type(), TypeId::of::<String>());
    assert!(description.value_type_name().contains("String"));
    assert!(description.object_type_info().is_none());

    let (_, engine) = info.member("engine").unwrap();
    assert_eq!(engine.kind(), MemberKind::Field);
    assert_eq!(engine.value_type(), TypeId::of::<Engine>());
    let engine_info = engine.object_type_info().unwrap();
    assert!(std::ptr::eq(engine_info, Engine::static_type_info()));
}

// Value read tests

#[test]
fn test_field_read_clones_value() {
    let car = test_car();
    let info = car.type_info();

    let (_, member) = info.member("model").unwrap();
    let value = member.read_value(car.as_any()).unwrap();
    let model = value.downcast::<String>().unwrap();
    assert_eq!(*model, "Fastback");

    // The read is a copy; the source still owns its value.
    assert_eq!(car.model, "Fastback");
}

#[test]
fn test_property_read_runs_getter() {
    let car = test_car();
    let info = car.type_info();

    let (_, member) = info.member("description").unwrap();
    let value = member.read_value(car.as_any()).unwrap();
    assert_eq!(*value.downcast::<String>().unwrap(), "Fastback (2 doors)");
}

#[test]
fn test_value_read_rejects_wrong_source_type() {
    let car = test_car();
    let engine = Engine {
        cylinders: 4,
        displacement_cc: 1600,
    };

    let (_, member) = car.type_info().member("model").unwrap();

    // Handing the accessor an instance of a different type is a checked
    // failure, not undefined behavior.
    assert!(member.read_value(engine.as_any()).is_none());
    assert!(member.read_value(car.as_any()).is_some());
}

#[test]
fn test_object_member_has_no_value_reading() {
    let car = test_car();
    let (_, member) = car.type_info().member("engine").unwrap();

    assert!(member.read_value(car.as_any()).is_none());
}

#[test]
fn test_value_member_is_not_an_object() {
    let car = test_car();
    let (_, member) = car.type_info().member("model").unwrap();

    assert!(member.object_type_info().is_none());
    assert!(member.read_object(car.as_any()).is_none());
}

// Object read tests

#[test]
fn test_object_field_borrows_in_place() {
    let car = test_car();
    let (_, member) = car.type_info().member("engine").unwrap();

    let handle = member.read_object(car.as_any()).unwrap();
    assert!(matches!(handle, ObjectHandle::Borrowed(_)));

    let engine = handle.as_introspect();
    assert!(std::ptr::eq(engine.type_info(), Engine::static_type_info()));

    // A borrowed handle reads straight out of the parent object.
    let inner = engine.as_any().downcast_ref::<Engine>().unwrap();
    assert!(std::ptr::eq(inner, &car.engine));
    assert_eq!(inner.cylinders, 8);
}

#[test]
fn test_object_property_owns_its_result() {
    let car = test_car();
    let (_, member) = car.type_info().member("spare_engine").unwrap();

    let handle = member.read_object(car.as_any()).unwrap();
    assert!(matches!(handle, ObjectHandle::Owned(_)));

    let spare = handle.as_introspect();
    let spare = spare.as_any().downcast_ref::<Engine>().unwrap();
    assert_eq!(spare.cylinders, 8);
    assert_eq!(spare.displacement_cc, 2300);

    // Each read runs the getter again and owns an independent result.
    let again = member.read_object(car.as_any()).unwrap();
    let again = again.as_introspect().as_any().downcast_ref::<Engine>();
    assert!(!std::ptr::eq(again.unwrap(), spare));
}

#[test]
fn test_object_read_rejects_wrong_source_type() {
    let car = test_car();
    let engine = Engine {
        cylinders: 6,
        displacement_cc: 3000,
    };

    let (_, member) = car.type_info().member("engine").unwrap();
    assert!(member.read_object(engine.as_any()).is_none());
}

// Erased access through dyn Introspect

#[test]
fn test_reads_through_dyn_introspect() {
    let car = test_car();
    let source: &dyn Introspect = &car;

    // The static type of the handle never comes into it; the member table
    // reported by the object itself drives every read.
    let info = source.type_info();
    assert_eq!(info.type_id(), TypeId::of::<Car>());

    let (_, doors) = info.member("doors").unwrap();
    let value = doors.read_value(source.as_any()).unwrap();
    assert_eq!(*value.downcast::<u8>().unwrap(), 2);

    let (_, engine) = info.member("engine").unwrap();
    let handle = engine.read_object(source.as_any()).unwrap();
    let nested: &dyn Introspect = handle.as_introspect();

    let (_, cylinders) = nested.type_info().member("cylinders").unwrap();
    let value = cylinders.read_value(nested.as_any()).unwrap();
    assert_eq!(*value.downcast::<u32>().unwrap(), 8);
}

#[test]
fn test_member_tables_are_shareable() {
    use static_assertions::assert_impl_all;

    // Tables are published behind &'static references and read from
    // arbitrary threads.
    assert_impl_all!(TypeInfo: Send, Sync);
}
