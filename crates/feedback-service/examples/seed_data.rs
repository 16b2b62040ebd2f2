//! 种子数据重置脚本
//!
//! 与启动填充不同，这是一个重置工具：
//! 清空全部已有反馈后重新插入完整样本集（6 条）。
//!
//! ```bash
//! FEEDBACK_DATABASE_URL=postgres://... cargo run --example seed_data
//! ```
//!
//! 退出码：成功 0，连接或插入失败 1。

use feedback_service::repository::{FeedbackRepository, FeedbackRepositoryTrait};
use feedback_service::seed::sample_feedback;
use feedback_shared::{config::AppConfig, database::Database};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("种子数据写入失败: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load("feedback-service").unwrap_or_default();

    println!("正在连接 PostgreSQL: {}", config.database.url);
    let db = Database::connect(&config.database).await?;
    println!("数据库连接成功");

    let repo = FeedbackRepository::new(db.pool().clone());
    repo.ensure_schema().await?;

    let removed = repo.delete_all().await?;
    println!("已清空 {removed} 条既有反馈");

    let inserted = repo.insert_many(&sample_feedback()).await?;
    println!("成功插入 {} 条样本反馈:", inserted.len());
    for (index, feedback) in inserted.iter().enumerate() {
        let preview: String = feedback.message.chars().take(60).collect();
        println!(
            "{}. {} - {} - {}星  状态: {}",
            index + 1,
            feedback.name,
            feedback.category.as_str(),
            feedback.rating,
            feedback.status.as_str(),
        );
        println!("   \"{preview}...\"");
    }

    let stats = repo.aggregate_stats().await?;
    println!("数据库统计:");
    println!("  总反馈数: {}", stats.total_feedback);
    println!("  平均评分: {:.1}", stats.average_rating);
    println!("  分类: {}", stats.categories.join(", "));
    println!("  状态: {}", stats.statuses.join(", "));

    db.close().await;
    println!("种子数据写入完成");

    Ok(())
}
