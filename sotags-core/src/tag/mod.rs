use crate::{entities::*, gateways::tag_source::SourceTag};

/// Sum of the counts of all tags.
///
/// The sum is calculated with 128 bits to rule out overflows
/// even for very large counts.
pub fn total_count<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> u128 {
    tags.into_iter().map(|t| u128::from(t.count)).sum()
}

/// The percentage of `count` in relation to `total`.
///
/// Returns exactly `0.0` if `total` is zero.
pub fn share_of_total(count: TagCount, total: u128) -> Share {
    if total == 0 {
        return 0.0;
    }
    100.0 * count as f64 / total as f64
}

/// Annotates each tag with its share of all given tags.
///
/// The order of the tags is preserved.
pub fn annotate_shares(records: Vec<TagRecord>) -> Vec<TagView> {
    let total = total_count(records.iter().map(|r| &r.tag));
    records
        .into_iter()
        .map(|TagRecord { id: _, tag }| {
            let Tag {
                name,
                count,
                fetched_at,
            } = tag;
            TagView {
                share: share_of_total(count, total),
                name,
                count,
                fetched_at,
            }
        })
        .collect()
}

/// Converts a tag from the source into a storable tag.
///
/// Tags without a name are discarded.
pub fn normalize_source_tag(source_tag: SourceTag, fetched_at: Timestamp) -> Option<Tag> {
    let SourceTag { name, count } = source_tag;
    let name = name.trim();
    if name.is_empty() {
        log::warn!("Discarding tag without a name (count = {count})");
        return None;
    }
    Some(Tag {
        name: name.to_owned(),
        count,
        fetched_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sotags_entities::builders::Builder as _;

    fn records(counts: &[(&str, TagCount)]) -> Vec<TagRecord> {
        counts
            .iter()
            .enumerate()
            .map(|(i, (name, count))| TagRecord {
                id: (i as i64).into(),
                tag: Tag::build().name(name).count(*count).finish(),
            })
            .collect()
    }

    #[test]
    fn shares_of_example_tags() {
        let views = annotate_shares(records(&[
            ("csharp", 100),
            ("java", 50),
            ("python", 40),
            ("go", 10),
        ]));
        let shares: Vec<_> = views.iter().map(|v| (v.name.as_str(), v.share)).collect();
        assert_eq!(
            shares,
            vec![("csharp", 50.0), ("java", 25.0), ("python", 20.0), ("go", 5.0)]
        );
    }

    #[test]
    fn shares_sum_up_to_one_hundred() {
        let views = annotate_shares(records(&[
            ("a", 7),
            ("b", 13),
            ("c", 1),
            ("d", 999_999_937),
            ("e", 3),
            ("f", 0),
        ]));
        let sum: f64 = views.iter().map(|v| v.share).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!(views.iter().all(|v| (0.0..=100.0).contains(&v.share)));
    }

    #[test]
    fn zero_shares_if_all_counts_are_zero() {
        let views = annotate_shares(records(&[("a", 0), ("b", 0)]));
        assert!(views.iter().all(|v| v.share == 0.0));
        assert!(views.iter().all(|v| !v.share.is_nan()));
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let views = annotate_shares(records(&[("a", u64::MAX), ("b", u64::MAX)]));
        assert_eq!(views[0].share, 50.0);
        assert_eq!(views[1].share, 50.0);
    }

    #[test]
    fn preserve_order_of_records() {
        let views = annotate_shares(records(&[("z", 1), ("a", 2), ("m", 3)]));
        let names: Vec<_> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn discard_source_tags_without_name() {
        let now = Timestamp::now();
        let blank = SourceTag {
            name: "  ".into(),
            count: 5,
        };
        assert!(normalize_source_tag(blank, now).is_none());
        let tag = normalize_source_tag(
            SourceTag {
                name: "rust ".into(),
                count: 5,
            },
            now,
        )
        .unwrap();
        assert_eq!(tag.name, "rust");
        assert_eq!(tag.count, 5);
        assert_eq!(tag.fetched_at, now);
    }
}
