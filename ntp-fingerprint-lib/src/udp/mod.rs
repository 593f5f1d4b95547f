#![forbid(unsafe_code)]

mod resolve;
mod sender;

pub use resolve::{resolve_target, TargetHost};
pub use sender::{bind_addr_for, hex, ProbeSender, TraceMode, UdpProbeSender, RECV_BUF_LEN};
