use serde::{Deserialize, Serialize};

/// Which relationship of the target profile to import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FriendshipType {
    #[default]
    Followers,
    Following,
    VerifiedFollowers,
    FollowersYouKnow,
    /// Accounts the profile subscribes to (`subscriptions` in the import form).
    #[serde(alias = "subscriptions")]
    SubscribedTo,
}

impl FriendshipType {
    /// Name the provider expects.
    pub fn as_str(self) -> &'static str {
        match self {
            FriendshipType::Followers => "followers",
            FriendshipType::Following => "following",
            FriendshipType::VerifiedFollowers => "verifiedFollowers",
            FriendshipType::FollowersYouKnow => "followersYouKnow",
            FriendshipType::SubscribedTo => "subscribedTo",
        }
    }

    /// Lenient parse for client input: anything unrecognised imports followers.
    pub fn from_input(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("following") => FriendshipType::Following,
            Some("verifiedFollowers") => FriendshipType::VerifiedFollowers,
            Some("followersYouKnow") => FriendshipType::FollowersYouKnow,
            Some("subscribedTo") | Some("subscriptions") => FriendshipType::SubscribedTo,
            _ => FriendshipType::Followers,
        }
    }
}
