pub mod auth;

pub mod interface;

pub mod session;

pub mod session_response;
