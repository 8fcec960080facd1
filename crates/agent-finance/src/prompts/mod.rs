//! Role, persona and goal texts for the four analysis stages
//!
//! - `roles`: role titles and personas of the stage workers
//! - `tasks`: goal templates and expected-output descriptions
//!
//! Goal templates are MiniJinja sources rendered by the pipeline with the
//! user request bound to `request`.

mod roles;
mod tasks;

pub use roles::*;
pub use tasks::*;
