use crate::utils::error::Result;

/// 每位送禮者一筆記錄的鍵值儲存：鍵為送禮者名稱，值為收禮者名稱
pub trait ArtifactStore {
    /// 清除先前內容並重新建立
    fn reset(&mut self) -> Result<()>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    /// 所有記錄的鍵，順序不保證
    fn list(&self) -> Result<Vec<String>>;
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// 給使用者看的儲存位置描述
    fn location(&self) -> String;
}

pub trait ConfigProvider {
    fn output_path(&self) -> &str;
    fn allow_reciprocal(&self) -> bool;
    fn seed(&self) -> Option<u64>;
}
