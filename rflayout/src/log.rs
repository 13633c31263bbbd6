//! Logging shim: the `log` facade in production builds, `println!` under
//! test so that messages appear in test output.

#[cfg(test)]
#[allow(unused_imports)]
pub(crate) use std::{println as debug, println as error, println as warn};

#[cfg(not(test))]
#[allow(unused_imports)]
pub(crate) use log::{debug, error, warn};
