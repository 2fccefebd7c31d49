pub mod codec;
pub mod errors;
pub mod methods;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod transport;

pub use errors::{RpcError, RpcResult};
pub use methods::ViewClient;
pub use transport::{HttpTransport, Transport};
