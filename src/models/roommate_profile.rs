use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seeking,
    Offering,
}

impl Role {
    pub fn opposite(self) -> Role {
        match self {
            Role::Seeking => Role::Offering,
            Role::Offering => Role::Seeking,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Seeking => "seeking",
            Role::Offering => "offering",
        }
    }
}

/// Role-dependent half of a profile. A seeker has search criteria, an
/// offerer describes the room on offer. Keeping these as tagged variants
/// makes "seeking profile with a rent amount" unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleDetails {
    Seeking {
        sleep_schedule: Option<String>,
        cleanliness: Option<String>,
        #[serde(default)]
        preferences: Vec<String>,
        budget: Option<f64>,
    },
    Offering {
        rooms: Option<i64>,
        rent: Option<f64>,
        room_size: Option<String>,
        house_rules: Option<String>,
        available_from: Option<String>,
    },
}

impl RoleDetails {
    pub fn role(&self) -> Role {
        match self {
            RoleDetails::Seeking { .. } => Role::Seeking,
            RoleDetails::Offering { .. } => Role::Offering,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoommateProfile {
    pub user_id: String,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(flatten)]
    pub details: RoleDetails,
}

impl RoommateProfile {
    pub fn role(&self) -> Role {
        self.details.role()
    }

    pub fn budget(&self) -> Option<f64> {
        match &self.details {
            RoleDetails::Seeking { budget, .. } => *budget,
            RoleDetails::Offering { .. } => None,
        }
    }

    pub fn rent(&self) -> Option<f64> {
        match &self.details {
            RoleDetails::Offering { rent, .. } => *rent,
            RoleDetails::Seeking { .. } => None,
        }
    }
}

/// Storage shape: one row, role-irrelevant columns NULL. The repository is
/// the only place that touches this; everything else works on
/// `RoommateProfile`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoommateProfileRow {
    pub user_id: String,
    pub name: String,
    pub role: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub sleep_schedule: Option<String>,
    pub cleanliness: Option<String>,
    pub preferences: Option<String>,
    pub budget: Option<f64>,
    pub rooms: Option<i64>,
    pub rent: Option<f64>,
    pub room_size: Option<String>,
    pub house_rules: Option<String>,
    pub available_from: Option<String>,
    pub updated_at: String,
}

impl RoommateProfileRow {
    pub fn into_profile(self) -> RoommateProfile {
        let details = if self.role == "offering" {
            RoleDetails::Offering {
                rooms: self.rooms,
                rent: self.rent,
                room_size: self.room_size,
                house_rules: self.house_rules,
                available_from: self.available_from,
            }
        } else {
            RoleDetails::Seeking {
                sleep_schedule: self.sleep_schedule,
                cleanliness: self.cleanliness,
                preferences: split_preferences(self.preferences.as_deref()),
                budget: self.budget,
            }
        };
        RoommateProfile {
            user_id: self.user_id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            location: self.location,
            bio: self.bio,
            details,
        }
    }
}

pub fn split_preferences(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn join_preferences(prefs: &[String]) -> String {
    prefs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
