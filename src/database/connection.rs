use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Review, SubCategory, User};
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

pub async fn connect(config: &DatabaseConfig) -> AppResult<Database> {
    let url = config.url.trim();

    // 连接串必须是 mongodb:// 或 mongodb+srv://
    if !url.starts_with("mongodb://") && !url.starts_with("mongodb+srv://") {
        return Err(AppError::ConfigError(
            "invalid MongoDB connection string, it must start with \"mongodb://\" or \"mongodb+srv://\""
                .to_string(),
        ));
    }

    let client = Client::with_uri_str(url).await?;
    Ok(client.database(&config.db_name))
}

/// 启动时创建唯一索引：用户邮箱、子分类名称、(用户, 商品) 评论对
pub async fn ensure_indexes(db: &Database) -> AppResult<()> {
    let unique = || IndexOptions::builder().unique(true).build();

    db.collection::<User>("users")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique())
                .build(),
        )
        .await?;

    db.collection::<SubCategory>("subcategories")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(unique())
                .build(),
        )
        .await?;

    db.collection::<Review>("reviews")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "userId": 1, "productId": 1 })
                .options(unique())
                .build(),
        )
        .await?;

    Ok(())
}
