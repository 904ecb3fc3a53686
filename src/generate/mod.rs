//! Generation pipeline: select eligible declarations, synthesize forwarders.
//!
//! The pipeline is split into three pieces:
//! - [`select`]: the eligibility filter over a parsed source file,
//! - [`types`]: the closed, renderable type vocabulary,
//! - [`forward`]: forwarder synthesis from a selected declaration.
//!
//! Selection is quiet (ineligible declarations are simply not candidates);
//! synthesis is loud (an eligible declaration that cannot be represented is a
//! [`SynthesisError`]).

pub mod forward;
pub mod select;
pub mod types;

pub use forward::{synthesize, ForwardParam, ForwardReceiver, Forwarder, SynthesisError};
pub use select::{eligible, CONTEXT_SUFFIX};
pub use types::{TypeDescriptor, UnsupportedShape};

/// The context expression injected as the first argument of every forwarded
/// call.
pub const DEFAULT_CONTEXT_EXPR: &str = "context.Background()";
