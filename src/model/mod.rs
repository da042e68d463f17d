pub mod quantity;
pub mod recommendation;

pub use quantity::{QuantityError, memory_mb_lenient, parse_memory_mb};
pub use recommendation::{Recommendation, RecommendationKind, RecommendationList, Resources};
