// Item-key parsing and item-to-snapshot grouping

use disk_analyser::models::MetricType;
use disk_analyser::zabbix::*;

fn item(host: &str, key: &str, value: f64, triggers: Vec<i64>) -> ItemRecord {
    ItemRecord {
        host: host.into(),
        key: key.into(),
        last_value: Some(value),
        trigger_priorities: triggers,
    }
}

#[test]
fn parse_plain_key() {
    let k = parse_item_key("vfs.fs.size[/var,pused]").unwrap();
    assert_eq!(k.mount, "/var");
    assert_eq!(k.metric, MetricType::PercentUsed);
}

#[test]
fn parse_empty_mount_is_root() {
    let k = parse_item_key("vfs.fs.size[,total]").unwrap();
    assert_eq!(k.mount, "/");
    assert_eq!(k.metric, MetricType::Total);
}

#[test]
fn parse_quoted_mount_and_mixed_case() {
    let k = parse_item_key("VFS.FS.SIZE[\"/mnt/data, archive\",USED]").unwrap();
    assert_eq!(k.mount, "/mnt/data, archive");
    assert_eq!(k.metric, MetricType::Used);
}

#[test]
fn parse_windows_drive() {
    let k = parse_item_key("vfs.fs.size[C:,free]").unwrap();
    assert_eq!(k.mount, "C:");
    assert_eq!(k.metric, MetricType::Free);
}

#[test]
fn parse_rejects_other_keys() {
    assert!(parse_item_key("vfs.fs.inode[/,pfree]").is_none());
    assert!(parse_item_key("vfs.fs.size[/,bogus]").is_none());
    assert!(parse_item_key("vfs.fs.size[/]").is_none());
    assert!(parse_item_key("vfs.fs.size[/,total").is_none());
    assert!(parse_item_key("system.cpu.load").is_none());
    assert!(parse_item_key("").is_none());
}

#[test]
fn item_key_roundtrips_through_parser() {
    for (mount, metric) in [
        ("/", MetricType::Total),
        ("/var/log", MetricType::Used),
        ("/mnt/my disk", MetricType::PercentUsed),
    ] {
        let key = item_key(mount, metric);
        let parsed = parse_item_key(&key).unwrap();
        assert_eq!(parsed.mount, mount);
        assert_eq!(parsed.metric, metric);
    }
    assert_eq!(item_key("", MetricType::Used), "vfs.fs.size[/,used]");
}

#[test]
fn trigger_priorities_map_to_severity() {
    assert_eq!(TriggerSeverity::from_priority(5), Some(TriggerSeverity::Critical));
    assert_eq!(TriggerSeverity::from_priority(4), Some(TriggerSeverity::Critical));
    assert_eq!(TriggerSeverity::from_priority(3), Some(TriggerSeverity::Warning));
    assert_eq!(TriggerSeverity::from_priority(2), Some(TriggerSeverity::Warning));
    assert_eq!(TriggerSeverity::from_priority(1), None);
    assert_eq!(TriggerSeverity::from_priority(0), None);
}

#[test]
fn items_group_into_snapshots() {
    let items = vec![
        item("web01", "vfs.fs.size[/,total]", 100.0, vec![]),
        item("web01", "vfs.fs.size[/,pused]", 42.0, vec![4, 2, 3, 1]),
        item("web01", "vfs.fs.size[/var,total]", 50.0, vec![]),
        item("web01", "vfs.fs.size[/var,used]", 10.0, vec![5]),
        item("db01", "vfs.fs.size[\"\",total]", 10.0, vec![]),
        item("db01", "vfs.fs.size[,pfree]", 30.0, vec![]),
        item("db01", "agent.ping", 1.0, vec![]),
    ];
    let snapshots = snapshots_from_items(&items);
    assert_eq!(snapshots.len(), 3);

    assert_eq!(snapshots[0].host, "db01");
    assert_eq!(snapshots[0].mount, "/");
    assert_eq!(snapshots[0].percent_used, Some(70.0));
    assert_eq!(snapshots[0].used_bytes, None);

    assert_eq!(snapshots[1].host, "web01");
    assert_eq!(snapshots[1].mount, "/");
    assert_eq!(snapshots[1].total_bytes, 100.0);
    assert_eq!(snapshots[1].percent_used, Some(42.0));
    assert_eq!(snapshots[1].critical_trigger_count, 1);
    assert_eq!(snapshots[1].warning_trigger_count, 2);

    assert_eq!(snapshots[2].mount, "/var");
    assert_eq!(snapshots[2].used_bytes, Some(10.0));
    assert_eq!(snapshots[2].critical_trigger_count, 1);
}

#[test]
fn used_is_derived_from_free() {
    let items = vec![
        item("h", "vfs.fs.size[/,total]", 100.0, vec![]),
        item("h", "vfs.fs.size[/,free]", 35.0, vec![]),
    ];
    let snapshots = snapshots_from_items(&items);
    assert_eq!(snapshots[0].used_bytes, Some(65.0));
}

#[test]
fn filesystem_without_total_is_skipped() {
    let items = vec![item("h", "vfs.fs.size[/,pused]", 50.0, vec![])];
    assert!(snapshots_from_items(&items).is_empty());
}
