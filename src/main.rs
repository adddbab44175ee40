//! # batch-signer CLI
//!
//! Command-line interface for the batch signing pipeline.
//!
//! ## Usage
//! ```bash
//! batch-signer sign 0 1 1 2 3 5
//! batch-signer sign --stdin --output json < values.txt
//! batch-signer inspect 42
//! ```

mod cli;

use batch_signer::Result;

fn main() -> Result<()> {
    cli::run()
}
