//! Decides which competitors of a division can no longer finish first, and why.
//!
//! Elimination of a competitor reduces to a maximum flow problem: the games left
//! among the other competitors are pushed through a network that caps how many
//! of them each competitor may still win. If not every game fits, the source side
//! of the minimum cut names a subset of competitors that is certain to beat the
//! target on average.
//!
//! ```
//! use division_elimination::{Division, Standings};
//!
//! let standings: Standings<String> = "4
//!     Atlanta       83 71  8  0 1 6 1
//!     Philadelphia  80 79  3  1 0 0 2
//!     New_York      78 78  6  6 0 0 0
//!     Montreal      77 82  3  1 2 0 0"
//!     .parse()
//!     .unwrap();
//! let division = Division::new(standings);
//! assert!(division.is_eliminated("Philadelphia").unwrap());
//! assert_eq!(
//!     division.certificate("Philadelphia").unwrap(),
//!     Some(vec!["Atlanta".to_owned(), "New_York".to_owned()])
//! );
//! ```

pub mod common;
pub mod division;
pub mod elimination;
pub mod error;
pub mod flow_network;
pub mod max_flow;
pub mod reduction;
pub mod standings;

pub use common::{Capacity, CompetitorName, UNBOUNDED};
pub use division::Division;
pub use elimination::{EliminationResult, Method};
pub use error::{EliminationError, Result};
pub use flow_network::{FlowEdge, FlowNetwork};
pub use max_flow::MaxFlow;
pub use reduction::{CompetitorVertices, EliminationNetwork};
pub use standings::{Record, Standings};
