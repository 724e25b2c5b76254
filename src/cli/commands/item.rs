use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::item::ItemLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::item::CatalogItem;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Item {
        add,
        description,
        source,
        icon,
        image,
        seed,
        grant,
        from,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(name) = add {
            let mut item = CatalogItem::new(name, description, source);
            item.icon_url = icon.clone();
            item.image_url = image.clone();

            let id = ItemLogic::add(&pool, &item)?;
            success(format!("Item #{} '{}' added to the catalog.", id, item.name));
        }

        if *seed {
            let added = ItemLogic::seed(&pool)?;
            if added.is_empty() {
                info("All achievement items are already in the catalog.");
            } else {
                success(format!("{} achievement item(s) added:", added.len()));
                for name in added {
                    println!("  • {}", name);
                }
            }
        }

        if let Some(item_id) = grant {
            let item = ItemLogic::grant(&pool, cfg.default_user, *item_id, from)?;
            success(format!(
                "'{}' given to user {} ({}).",
                item.name, cfg.default_user, from
            ));
        }
    }

    Ok(())
}
