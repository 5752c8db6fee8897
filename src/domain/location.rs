// ==========================================
// 经销商导出数据校验系统 - 网点领域模型
// ==========================================
// 职责: 品牌/经销商/网点 三元组,校验与报表的最小粒度
// 生命周期: 目录扫描时创建,运行期内只读
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub brand: String,
    pub dealer: String,
    pub site: String,
    #[serde(skip)]
    pub path: PathBuf, // 网点目录
}

impl Location {
    pub fn new(
        brand: impl Into<String>,
        dealer: impl Into<String>,
        site: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            brand: brand.into(),
            dealer: dealer.into(),
            site: site.into(),
            path: path.into(),
        }
    }

    /// 品牌/经销商/网点 路径形式
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.brand, self.dealer, self.site)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
