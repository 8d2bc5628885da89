//! Search algorithms over a pathviz [`Grid`](pathviz_core::Grid).
//!
//! - **A\*** ([`astar`]): the visual shortest-path search. It writes
//!   open/closed/path marks into the grid and reports every step to a
//!   [`RenderSink`], polling a [`CancelSignal`] between steps.
//! - **Reachability** ([`Reach`]): breadth-first step counts and region
//!   labelling, used to explain failed searches and to check mazes.
//!
//! # Seams
//!
//! | Trait | Role |
//! |---|---|
//! | [`Pather`] | neighbour enumeration for [`Reach`] |
//! | [`RenderSink`] | one synchronous frame per search step |
//! | [`CancelSignal`] | polled once per iteration; `true` aborts |

mod astar;
mod distance;
mod reach;
mod traits;

pub use astar::{SearchOutcome, astar};
pub use distance::manhattan;
pub use reach::{Reach, UNREACHABLE};
pub use traits::{CancelSignal, Never, NoRender, Pather, RenderSink, SearchEvent};
