//! Testing harness for portal sidebar widgets.
//!
//! ```ignore
//! use portal_test::Harness;
//!
//! let mut harness = Harness::new(item);
//! harness.hover("text=ST");
//! harness.assert_exists("[data-testid='edit']");
//! ```

mod harness;
mod selector;

pub use harness::Harness;
pub use selector::{Selector, SelectorError, SelectorParser};
