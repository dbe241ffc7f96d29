// src/recipe/mod.rs

//! RPM spec recipes
//!
//! A recipe is the `.spec` file that builds one upstream package. Only the
//! parts that matter for translation are modeled:
//! - **Stages**: every `%section` block, in order (`%build` drives build
//!   system detection)
//! - **Sources** and **Patches**: labeled declarations, in declaration order
//! - **Macros**: `%global`/`%define` plus tag-derived values, used to expand
//!   source URLs
//!
//! # Example
//!
//! ```
//! use rpm2flatpak::recipe::{parse_spec, MacroTable};
//!
//! let recipe = parse_spec(
//!     "Name: foo\nVersion: 1.0\nSource0: https://example.org/%{name}-%{version}.tar.gz\n\
//!      %build\n%cmake -B build\n",
//! )
//! .unwrap();
//!
//! assert_eq!(recipe.build_tool(), Some("%cmake"));
//! let sources = recipe.expanded_sources(&MacroTable::new());
//! assert_eq!(sources[0].1, "https://example.org/foo-1.0.tar.gz");
//! ```

mod format;
pub mod macros;
pub mod parser;

pub use format::{Declarations, MacroTable, Recipe, Stage};
pub use parser::{parse_spec, ParseError};
