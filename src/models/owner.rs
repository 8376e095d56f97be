// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Owner id normalization.
//!
//! `createdBy` is stored either as a raw user id or as a document path such
//! as `users/abc123`. Every ownership comparison goes through
//! [`last_path_segment`] first.

/// Return the trailing segment of a slash-delimited path.
///
/// A value without slashes is returned unchanged; trailing slashes are ignored.
pub fn last_path_segment(value: &str) -> &str {
    let trimmed = value.trim().trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Whether a stored owner reference identifies the given user.
pub fn is_same_owner(created_by: Option<&str>, uid: &str) -> bool {
    let uid = last_path_segment(uid);
    !uid.is_empty() && created_by.map(last_path_segment) == Some(uid)
}
