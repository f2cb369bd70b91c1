//! Member resolution: matching one shape declaration against one source
//! member table.
//!
//! Resolution is purely structural. It never consults the static type of
//! the source object, only the member table the object's type published,
//! so whether a shape fits is decided by names and member types alone.

use shapecast_internals::TypeInfo;

use crate::{
    diagnosis::FailureReason,
    shape::{MemberDecl, ShapeDescriptor, TargetKind},
};

/// A successfully matched member declaration, ready to become a plan op.
#[derive(Debug)]
pub(crate) enum Resolution {
    /// The source member yields a plain value of the declared type.
    Value {
        /// Index of the member in the source's member table.
        member: usize,
    },
    /// The source member yields an object to project a nested shape from.
    Object {
        /// Index of the member in the source's member table.
        member: usize,
        /// Member table of the object behind the member.
        object_info: &'static TypeInfo,
        /// Thunk for the nested shape's descriptor.
        descriptor: fn() -> &'static ShapeDescriptor,
    },
}

/// Resolves a single shape member declaration against a source member
/// table.
///
/// Lookup is by the declaration's source name; when a field and a computed
/// member share that name, the field is chosen. The caller is responsible
/// for recursing into nested shapes, so a successful [`Resolution::Object`]
/// only promises that the member is an object, not that the nested shape
/// fits it.
pub(crate) fn resolve_member(
    source: &'static TypeInfo,
    decl: &MemberDecl,
) -> Result<Resolution, FailureReason> {
    let Some((index, member)) = source.member(decl.source_name()) else {
        return Err(FailureReason::NoSuchMember);
    };

    match decl.kind() {
        TargetKind::Value { type_id, type_name } => {
            if member.object_type_info().is_some() {
                return Err(FailureReason::NotAValue {
                    found: member.value_type_name(),
                });
            }
            if member.value_type() != type_id {
                return Err(FailureReason::ValueTypeMismatch {
                    expected: type_name,
                    found: member.value_type_name(),
                });
            }
            Ok(Resolution::Value { member: index })
        }
        TargetKind::Nested { descriptor } => match member.object_type_info() {
            Some(object_info) => Ok(Resolution::Object {
                member: index,
                object_info,
                descriptor,
            }),
            None => Err(FailureReason::NotAnObject {
                found: member.value_type_name(),
            }),
        },
    }
}
