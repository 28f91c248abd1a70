//! One field-locator strategy per supported document revision.

pub mod procuity;
pub mod sterilgard_e3;
pub mod sterilgard_sgx04;

pub use procuity::ProCuity;
pub use sterilgard_e3::SterilGardE3;
pub use sterilgard_sgx04::SterilGardSgx04;
