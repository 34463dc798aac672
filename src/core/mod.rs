// Domain-layer modules and shared errors/models
pub mod scoring {
    pub use crate::scoring::*;
}

pub mod scorers {
    pub use crate::scorers::*;
}

pub mod normalize {
    pub use crate::normalize::*;
}

pub mod weights {
    pub use crate::weights::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
