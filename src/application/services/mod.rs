pub mod differ;
pub mod ig_api;
pub mod pacing;
pub mod runner;
pub mod unfollow_service;
