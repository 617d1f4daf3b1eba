use crate::{
    info,
    management::{RejectedManager, RejectedStore},
    warning,
};

pub async fn rejected() {
    match RejectedManager::load().await {
        Ok(rejected) if rejected.count() == 0 => info!("No disliked tracks."),
        Ok(rejected) => {
            info!("{} disliked tracks:", rejected.count());
            for id in rejected.ids() {
                println!("  {}", id);
            }
        }
        Err(e) => warning!("Cannot load disliked tracks: {}", e),
    }
}
