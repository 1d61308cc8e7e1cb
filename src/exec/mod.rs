/// Command execution contract: input resolution, invocation, output routing.
pub mod errors;
pub mod executor;
pub mod input;
pub mod route;

pub use errors::CommandError;
pub use executor::{Executor, Operation};
pub use input::{InputSources, read_piped_stdin};
pub use route::OutputTarget;
