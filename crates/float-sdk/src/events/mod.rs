/*
[INPUT]:  Domain events produced by resource clients
[OUTPUT]: Synchronous publish/subscribe with catch-all relays
[POS]:    Events layer - emitter shared by resource clients and the facade
[UPDATE]: When adding payload shapes or subscription kinds
*/

pub mod emitter;
pub mod event;

pub use emitter::{EventEmitter, Handler};
pub use event::{Event, EventPayload};
