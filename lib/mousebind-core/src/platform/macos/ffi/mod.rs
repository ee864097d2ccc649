pub use private::*;

mod private;
