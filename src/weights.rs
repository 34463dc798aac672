use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Relative weight of each component score in the overall blend.
///
/// Profiles are fixed per category. The shipped profiles all sum to 1.0, but
/// the aggregator divides by `total()` anyway so extended profiles keep
/// confidence on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub team: f64,
    pub community: f64,
    pub adoption: f64,
}

impl CategoryWeights {
    pub fn total(&self) -> f64 {
        self.team + self.community + self.adoption
    }

    /// Weight profile for a category.
    ///
    /// Infrastructure excludes adoption entirely — its weight is exactly 0.0,
    /// matching the adoption scorer's unconditional zero for those projects.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Infrastructure => Self {
                team: 0.6,
                community: 0.4,
                adoption: 0.0,
            },
            Category::Defi => Self {
                team: 0.25,
                community: 0.25,
                adoption: 0.5,
            },
            Category::Dao => Self {
                team: 0.3,
                community: 0.5,
                adoption: 0.2,
            },
            Category::Nft | Category::Gaming | Category::Other => Self {
                team: 0.4,
                community: 0.3,
                adoption: 0.3,
            },
        }
    }
}
