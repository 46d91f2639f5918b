pub mod files;
pub mod init;
pub mod projects;
pub mod shell;
pub mod versions;
