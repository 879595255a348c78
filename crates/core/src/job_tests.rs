// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn data_map_keeps_duplicates_in_order() {
    let mut data = JobDataMap::new();
    data.push("a", "1");
    data.push("b", "2");
    data.push("a", "3");

    assert_eq!(data.len(), 3);
    assert_eq!(data.get("a"), Some("3"));
    assert_eq!(data.get("b"), Some("2"));
    assert_eq!(data.get("c"), None);
    assert_eq!(data.entries()[0], ("a".to_string(), "1".to_string()));
}

#[test]
fn data_map_from_iterator() {
    let data: JobDataMap = [("k", "v")].into_iter().collect();
    assert_eq!(data.get("k"), Some("v"));
}

#[test]
fn job_detail_builder_defaults() {
    let job = JobDetail::new(JobKey::new("j", "g"), JobType::new("report"));
    assert!(!job.durable);
    assert!(!job.volatile);
    assert!(!job.request_recovery);
    assert!(job.description.is_none());

    let job = job.durable(true).with_description("nightly");
    assert!(job.durable);
    assert_eq!(job.description.as_deref(), Some("nightly"));
    assert_eq!(job.job_type.name(), "report");
}

#[test]
fn job_detail_serde_preserves_key_durability_and_data() {
    let mut job = JobDetail::new(JobKey::new("j", "g"), JobType::new("report")).durable(true);
    job.data.push("x", "1");
    job.data.push("x", "2");

    let json = serde_json::to_string(&job).unwrap();
    let back: JobDetail = serde_json::from_str(&json).unwrap();
    assert_eq!(back, job);
}
