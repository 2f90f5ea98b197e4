//! The components module contains the media controllers and their host seams.

pub mod media_controls;
