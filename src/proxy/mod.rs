// Proxy module - HTTP gateway between the NaijaHub frontend and its providers
//
// The browser only ever talks to this process. Provider credentials stay
// server-side, news responses are coalesced through a shared snapshot cache,
// and provider failures are translated into a small, stable set of JSON
// error bodies the frontend can render.

mod cache;
mod error;
mod news;
mod server;
mod state;
mod summary;
mod upstream;

pub use server::start_proxy;
