//! Integration scenarios. The executor is a bash script, so these run on
//! Unix only.

#[cfg(all(test, unix))]
mod fixtures;

#[cfg(all(test, unix))]
mod e2e_wipe;
#[cfg(all(test, unix))]
mod flows;
