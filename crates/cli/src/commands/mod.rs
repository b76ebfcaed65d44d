pub(crate) mod admin;
pub(crate) mod load;
pub(crate) mod serve;
