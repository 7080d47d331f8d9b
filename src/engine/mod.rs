//! Engine module: collaborators at the traversal boundary (fetch, decode) and the CLI around it.

pub mod arg_parser;
pub mod cli;
pub mod decode;
pub mod fetch;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::{LoadedOpts, build_opts, handle_run};
pub use decode::{DecodeError, decode_neighbors};
pub use fetch::{FetchError, HttpFetcher, HttpNeighborService, NeighborFetcher, NeighborService};
pub use output::{print_levels, write_levels};
