//! Single-condition matching.

use regex::RegexBuilder;

use crate::model::Recommendation;
use crate::policy::types::{Condition, Field, Operator};

/// Resolve a field selector to the recommendation's value.
/// `None` means the field is unknown or absent, which never matches.
fn resolve<'a>(field: &Field, rec: &'a Recommendation) -> Option<&'a str> {
    match field {
        Field::Workload => Some(rec.workload.as_str()),
        Field::Namespace => Some(rec.namespace.as_str()),
        Field::Type => Some(rec.kind.as_str()),
        Field::NodePool => rec.node_pool.as_deref(),
        Field::StorageClass => rec.storage_class.as_deref(),
        Field::AccessMode => rec.access_mode.as_deref(),
        Field::Unknown(_) => None,
    }
}

/// Decide whether `condition` holds for `rec`.
///
/// True when the selected field matches any candidate value under the
/// operator. Unknown fields and operators evaluate to false.
pub fn evaluate(condition: &Condition, rec: &Recommendation) -> bool {
    let Some(raw) = resolve(&condition.field, rec) else {
        return false;
    };
    let fold = condition.field.case_insensitive();
    let normalize = |s: &str| if fold { s.to_lowercase() } else { s.to_string() };
    let subject = normalize(raw);

    match &condition.operator {
        Operator::Contains => condition
            .values
            .iter()
            .any(|v| subject.contains(&normalize(v.as_str()))),
        Operator::Equals => condition.values.iter().any(|v| subject == normalize(v.as_str())),
        Operator::StartsWith => condition
            .values
            .iter()
            .any(|v| subject.starts_with(&normalize(v.as_str()))),
        Operator::Regex => condition.values.iter().any(|pattern| {
            match RegexBuilder::new(pattern).case_insensitive(fold).build() {
                Ok(re) => re.is_match(raw),
                Err(e) => {
                    log::warn!(
                        "invalid regex `{pattern}` on field {}: {e}; treating as no match",
                        condition.field.as_str()
                    );
                    false
                }
            }
        }),
        Operator::Unknown(name) => {
            log::debug!("unknown operator `{name}`; condition does not match");
            false
        }
    }
}
