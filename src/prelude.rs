//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::factory::*;
#[doc(no_inline)]
pub use crate::pi::{estimate_pi, CircleArea, SamplePoint, UnitSquare};
#[doc(no_inline)]
pub use crate::result::{Error, ErrorKind};
#[doc(no_inline)]
pub use crate::sampler::{random_bool, uniform01, FairCoin, Unit01};
#[doc(no_inline)]
pub use crate::traits::*;
