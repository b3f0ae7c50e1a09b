// src/downloader/dispatcher.rs

use crate::{
    error::*,
    models::{AssetReference, DownloadTask},
    utils,
};
use log::{debug, warn};
use std::{
    collections::{BTreeMap, BTreeSet, btree_map::Entry},
    path::{Path, PathBuf},
};
use url::Url;

/// 调度前的整理结果：待下载任务、站外引用、无法映射的引用，
/// 以及与已有任务映射到同一目标路径的引用 (重复引用, 保留的引用)。
#[derive(Debug, Default)]
pub struct DispatchPlan {
    pub tasks: Vec<DownloadTask>,
    pub external: Vec<AssetReference>,
    pub rejected: Vec<(AssetReference, AppError)>,
    pub duplicates: Vec<(AssetReference, AssetReference)>,
}

/// 把引用解析为完整地址。已带协议头的引用原样使用，否则拼接到站点根地址之后。
pub fn resolve_url(base_url: &Url, reference: &AssetReference) -> AppResult<Url> {
    let raw = reference.as_str().trim();
    if reference.is_external() {
        return Ok(Url::parse(raw)?);
    }
    let base = base_url.as_str().trim_end_matches('/');
    let separator = if raw.starts_with('/') { "" } else { "/" };
    Ok(Url::parse(&format!("{}{}{}", base, separator, raw))?)
}

/// 引用在输出目录下的镜像路径，只由引用字符串和输出目录决定。
pub fn resolve_destination(output_root: &Path, reference: &AssetReference) -> AppResult<PathBuf> {
    let path = utils::reference_path(reference.as_str().trim())?;
    utils::secure_join_path(output_root, Path::new(&path))
}

/// 每个目标路径只保留一个任务，保证并发任务之间不会写同一个文件。
pub fn plan_tasks(
    references: &BTreeSet<AssetReference>,
    base_url: &Url,
    output_root: &Path,
) -> DispatchPlan {
    let mut plan = DispatchPlan::default();
    let mut by_destination: BTreeMap<PathBuf, DownloadTask> = BTreeMap::new();
    for reference in references {
        if reference.is_external() {
            debug!("跳过站外资源: {}", reference);
            plan.external.push(reference.clone());
            continue;
        }
        let task = resolve_url(base_url, reference).and_then(|url| {
            Ok(DownloadTask {
                reference: reference.clone(),
                url,
                destination: resolve_destination(output_root, reference)?,
            })
        });
        match task {
            Ok(task) => match by_destination.entry(task.destination.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(task);
                }
                Entry::Occupied(slot) => {
                    debug!(
                        "引用 '{}' 与 '{}' 映射到同一路径 {:?}",
                        reference,
                        slot.get().reference,
                        slot.key()
                    );
                    plan.duplicates
                        .push((reference.clone(), slot.get().reference.clone()));
                }
            },
            Err(e) => {
                warn!("无法为引用 '{}' 生成下载任务: {}", reference, e);
                plan.rejected.push((reference.clone(), e));
            }
        }
    }
    plan.tasks = by_destination.into_values().collect();
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn relative_references_are_appended_to_base() {
        let url = resolve_url(&base(), &"/img/logo.png".into()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/img/logo.png");

        let url = resolve_url(&base(), &"css/site.css".into()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/css/site.css");

        let nested = Url::parse("http://example.com/site/").unwrap();
        let url = resolve_url(&nested, &"/js/app.js".into()).unwrap();
        assert_eq!(url.as_str(), "http://example.com/site/js/app.js");
    }

    #[test]
    fn absolute_references_are_used_as_is() {
        let url = resolve_url(&base(), &"https://cdn.example.com/a.js".into()).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/a.js");
    }

    #[test]
    fn destination_mirrors_reference_path() {
        let root = Path::new("mirror");
        let reference = AssetReference::from("/img/icons/logo.png");
        let first = resolve_destination(root, &reference).unwrap();
        let second = resolve_destination(root, &reference).unwrap();
        assert_eq!(first, root.join("img").join("icons").join("logo.png"));
        assert_eq!(first, second);

        let encoded = resolve_destination(root, &"/fonts/My%20Font.woff2?v=1".into()).unwrap();
        assert_eq!(encoded, root.join("fonts").join("My Font.woff2"));
    }

    #[test]
    fn plan_separates_external_and_invalid_references() {
        let references: BTreeSet<AssetReference> = [
            "/img/logo.png",
            "/css/site.css",
            "https://cdn.example.com/a.js",
            "../secret.png",
        ]
        .into_iter()
        .map(AssetReference::from)
        .collect();

        let plan = plan_tasks(&references, &base(), Path::new("out"));

        let destinations: Vec<_> = plan.tasks.iter().map(|t| t.destination.clone()).collect();
        assert_eq!(
            destinations,
            vec![
                Path::new("out").join("css").join("site.css"),
                Path::new("out").join("img").join("logo.png"),
            ]
        );
        assert_eq!(plan.external, vec![AssetReference::from("https://cdn.example.com/a.js")]);
        assert_eq!(plan.rejected.len(), 1);
        assert!(matches!(plan.rejected[0].1, AppError::Security(_)));
    }

    #[test]
    fn references_sharing_a_destination_yield_one_task() {
        let references: BTreeSet<AssetReference> =
            ["/img/a.png", "./img/a.png", "img/a.png", "/img/%61.png", "/img/b.png"]
                .into_iter()
                .map(AssetReference::from)
                .collect();

        let plan = plan_tasks(&references, &base(), Path::new("out"));

        assert_eq!(plan.tasks.len(), 2);
        let destinations: BTreeSet<_> = plan.tasks.iter().map(|t| t.destination.clone()).collect();
        assert_eq!(destinations.len(), plan.tasks.len());
        // BTreeSet 中 "./img/a.png" 最先出现，作为保留的引用
        assert_eq!(plan.tasks[0].reference.as_str(), "./img/a.png");
        assert_eq!(plan.tasks[0].destination, Path::new("out").join("img").join("a.png"));
        assert_eq!(plan.duplicates.len(), 3);
        assert!(plan.duplicates.iter().all(|(_, kept)| kept.as_str() == "./img/a.png"));
    }
}
