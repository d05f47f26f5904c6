//! Chorekit-Common: shared file-name and path utilities.
//!
//! - **Name cleaning**: turn release-style file names into tidy ones
//! - **Path utilities**: file type detection and derived artifact paths
//!
//! # Examples
//!
//! ```
//! use chorekit_common::names::clean_file_name;
//! use chorekit_common::paths::is_video_file;
//! use std::path::Path;
//!
//! assert_eq!(clean_file_name("[Grp] My_Show.01.mkv"), "My Show 01.mkv");
//! assert!(is_video_file(Path::new("movie.mkv")));
//! ```

pub mod names;
pub mod paths;
