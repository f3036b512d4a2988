use crate::{PreferencesData, ServerRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerOrigin {
    Favorite,
    Listed,
    Custom,
}

impl ServerOrigin {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::Listed => "",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub record: ServerRecord,
    pub origin: ServerOrigin,
}

/// Placeholder public servers; there is no live master-server query.
pub fn static_servers() -> Vec<ServerRecord> {
    vec![
        ServerRecord::new(
            "DarkRP #1 | Starter level",
            "24/32",
            "rp_downtown_v4c_v2",
            "45",
            "gmod.example.com:27015",
        ),
        ServerRecord::new(
            "TTT Pro | Competitive mode",
            "12/16",
            "ttt_minecraft",
            "62",
            "ttt.example.com:27015",
        ),
        ServerRecord::new(
            "Murder Mystery",
            "8/10",
            "mu_mansion",
            "38",
            "murder.example.com:27015",
        ),
        ServerRecord::new(
            "Sandbox | Free build",
            "15/20",
            "gm_flatgrass",
            "55",
            "sandbox.example.com:27015",
        ),
        ServerRecord::new(
            "Zombie Survival",
            "18/24",
            "zs_lighthouse",
            "42",
            "zombie.example.com:27015",
        ),
    ]
}

/// Favorites, then the placeholder list, then custom entries.
pub fn merged_listing(preferences: &PreferencesData) -> Vec<ServerEntry> {
    let mut entries = tagged(&preferences.favorites, ServerOrigin::Favorite);
    entries.extend(tagged(&static_servers(), ServerOrigin::Listed));
    entries.extend(tagged(&preferences.custom_servers, ServerOrigin::Custom));
    entries
}

fn tagged(records: &[ServerRecord], origin: ServerOrigin) -> Vec<ServerEntry> {
    records
        .iter()
        .cloned()
        .map(|record| ServerEntry { record, origin })
        .collect()
}

pub fn filter_listing(entries: Vec<ServerEntry>, query: &str) -> Vec<ServerEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| {
            let record = &entry.record;
            [&record.display_name, &record.map_name, &record.address]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn find_by_address<'a>(entries: &'a [ServerEntry], address: &str) -> Option<&'a ServerEntry> {
    let address = address.trim();
    entries.iter().find(|entry| entry.record.address == address)
}
