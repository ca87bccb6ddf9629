//! Room module: one single-owner actor per table.
//!
//! This module implements:
//! - RoomActor: async actor owning one game and its session bookkeeping
//! - Message-based communication with tokio channels
//! - Room configuration and reconnection rebinding
//!
//! ## Architecture
//!
//! Each room runs in its own Tokio task with an mpsc message inbox; the
//! actor is the only writer of its game, so no two actions for the same
//! room are ever applied concurrently. Reconnection is a pure rebind of
//! a transient session id to a stable player id; the actor keeps no
//! timers of its own.
//!
//! ## Example
//!
//! ```
//! use holdem_engine::room::{RoomActor, RoomConfig, RoomMessage};
//! use tokio::sync::oneshot;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let (actor, handle) = RoomActor::new(RoomConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     let (tx, rx) = oneshot::channel();
//!     handle
//!         .send(RoomMessage::Join {
//!             session: "socket-1".into(),
//!             nickname: "alice".to_string(),
//!             response: tx,
//!         })
//!         .await
//!         .unwrap();
//!     assert!(rx.await.unwrap().is_success());
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{RoomActor, RoomHandle};
pub use config::RoomConfig;
pub use messages::{LeaderboardEntry, RoomMessage, RoomResponse, SessionId};
