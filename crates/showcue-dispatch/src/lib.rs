//! Trigger dispatch for showcue.
//!
//! Sends a control's kind and label to the presentation-control API as
//! `POST <endpoint>?action=<identifier>&data={"value":"<label>"}` and
//! reports every outcome through a [`Notifier`].

pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod notice;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::DispatchError;
pub use notice::{ChannelNotifier, LogNotifier, Notice, NoticeLevel, Notifier};
