pub mod analysis;
pub mod figure;
pub mod news;
pub mod response;
pub mod stock;
pub mod table;

pub use analysis::*;
pub use figure::*;
pub use news::*;
pub use response::*;
pub use stock::*;
pub use table::*;
