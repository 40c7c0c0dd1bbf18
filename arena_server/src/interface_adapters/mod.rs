// Interface adapters: wire protocol, network handling and static files.

pub mod http;
pub mod net;
pub mod protocol;
pub mod state;
