mod admin;

pub use admin::AdminAccount;
