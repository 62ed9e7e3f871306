//! Advisory Module - Mitigation Guidance
//!
//! Static pathogen profiles and the rules that turn a decision into a few
//! lines of field guidance.

pub mod guidance;
pub mod profiles;

pub use guidance::{compose, GuidanceContext, MAX_GUIDANCE_LINES};
pub use profiles::{profile, PathogenProfile, PathogenType};
