//! Static page content.  Plain data; nothing here changes at runtime.

/// A hoverable card that reveals `content` while the pointer is over it.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone)]
pub struct Skill {
    pub name: &'static str,
    pub color: (u8, u8, u8),
}

/// A copyable address.  The address doubles as the feedback item id.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub label: &'static str,
    pub label_color: (u8, u8, u8),
    pub address: &'static str,
}

#[derive(Debug, Clone)]
pub struct SocialLink {
    pub name: &'static str,
    pub link: &'static str,
}

#[derive(Debug, Clone)]
pub struct Profile {
    /// Rendered as `name` + `name_accent` in two colours.
    pub name: &'static str,
    pub name_accent: &'static str,
    pub tagline: &'static str,
    pub sections: Vec<Section>,
    pub skills: Vec<Skill>,
    pub wallets: Vec<Wallet>,
    pub socials: Vec<SocialLink>,
    /// Remotely hosted image; shown as a link, never fetched.
    pub stats_image_url: &'static str,
}

impl Profile {
    pub fn builtin() -> Self {
        Self {
            name: "Faker",
            name_accent: "PK",
            tagline: "'s Digital Realm",
            sections: vec![
                Section {
                    title: "Python Development",
                    content: "Crafting custom scripts for automation, data processing, and crypto workflows.",
                },
                Section {
                    title: "Game Development",
                    content: "Designing immersive gaming experiences and interactive workflows.",
                },
                Section {
                    title: "Crypto Exploration",
                    content: "Innovating airdrop farming techniques and exploring blockchain opportunities.",
                },
            ],
            skills: vec![
                Skill { name: "Python", color: (59, 130, 246) },
                Skill { name: "JavaScript", color: (234, 179, 8) },
                Skill { name: "Git", color: (249, 115, 22) },
            ],
            wallets: vec![
                Wallet {
                    label: "Solana",
                    label_color: (96, 165, 250),
                    address: "9SqcZjiUAz9SYBBLwuA9uJG4UzwqC5HNWV2cvXPk3Kro",
                },
                Wallet {
                    label: "EVM",
                    label_color: (74, 222, 128),
                    address: "0x2d550c8A47c60A43F8F4908C5d462184A40922Ef",
                },
                Wallet {
                    label: "BTC",
                    label_color: (251, 146, 60),
                    address: "bc1qhx7waktcttam9q9nt0ftdguguwg5lzq5hnasmm",
                },
            ],
            socials: vec![
                SocialLink { name: "LinkedIn", link: "https://www.linkedin.com/in/fakerpk/" },
                SocialLink { name: "Twitter", link: "https://x.com/FakerPK" },
                SocialLink { name: "YouTube", link: "https://youtube.com/c/FakerPK" },
            ],
            stats_image_url: "https://github-readme-stats.vercel.app/api?username=fakerpk&theme=radical&show_icons=true",
        }
    }
}
