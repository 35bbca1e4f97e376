use colored::Color;
use serde::Serialize;

/// A single example occupation inside a route.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Grouping label within the route ("Hospital Hill", "Digi Lab", ...).
    pub zone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconTag {
    Heart,
    Gear,
    Brush,
    Money,
    Leaf,
    Speech,
}

impl IconTag {
    pub fn glyph(&self) -> &'static str {
        match self {
            IconTag::Heart => "❤️",
            IconTag::Gear => "⚙️",
            IconTag::Brush => "🎨",
            IconTag::Money => "💰",
            IconTag::Leaf => "🌿",
            IconTag::Speech => "💬",
        }
    }
}

/// A themed career category with a fixed list of example jobs.
/// This is static reference data; it is never mutated at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub id: String,
    pub title: String,
    pub icon: IconTag,
    pub color: String,
    /// The "place" this route is presented as ("Care City", "Tech Island", ...).
    pub metaphor: String,
    pub description: String,
    /// Lowercase keywords matched against the reflection text.
    pub tags: Vec<String>,
    pub jobs: Vec<Job>,
}

impl Route {
    /// Zone labels in encounter order, without duplicates.
    pub fn zones(&self) -> Vec<&str> {
        let mut zones: Vec<&str> = Vec::new();
        for job in &self.jobs {
            if !zones.contains(&job.zone.as_str()) {
                zones.push(job.zone.as_str());
            }
        }
        zones
    }

    pub fn jobs_in_zone(&self, zone: &str) -> Vec<&Job> {
        self.jobs.iter().filter(|j| j.zone == zone).collect()
    }

    pub fn terminal_color(&self) -> Color {
        match self.color.as_str() {
            "rose" => Color::BrightMagenta,
            "blue" => Color::BrightBlue,
            "purple" => Color::Magenta,
            "yellow" => Color::Yellow,
            "green" => Color::Green,
            "orange" => Color::BrightRed,
            _ => Color::White,
        }
    }
}

pub fn route_by_id<'a>(routes: &'a [Route], id: &str) -> Option<&'a Route> {
    routes.iter().find(|r| r.id == id)
}

/// Look up a job anywhere in the catalog, together with its route.
pub fn find_job<'a>(routes: &'a [Route], job_id: &str) -> Option<(&'a Route, &'a Job)> {
    for route in routes {
        if let Some(job) = route.jobs.iter().find(|j| j.id == job_id) {
            return Some((route, job));
        }
    }
    None
}

/// Job title for display; falls back to the raw identifier for ids
/// that are no longer in the catalog.
pub fn job_title(routes: &[Route], job_id: &str) -> String {
    find_job(routes, job_id)
        .map(|(_, job)| job.title.clone())
        .unwrap_or_else(|| job_id.to_string())
}

/// Resolve route ids to display titles, in catalog order no matter
/// what order the ids arrive in. Unknown ids are dropped.
pub fn route_titles<'a>(routes: &'a [Route], ids: &[&str]) -> Vec<&'a str> {
    routes
        .iter()
        .filter(|r| ids.contains(&r.id.as_str()))
        .map(|r| r.title.as_str())
        .collect()
}

fn job(id: &str, title: &str, description: &str, zone: &str) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        zone: zone.to_string(),
    }
}

fn tags(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// The fixed route catalog: six themed routes, four example jobs each.
pub fn catalog() -> Vec<Route> {
    vec![
        Route {
            id: "care".to_string(),
            title: "Care & Helping People".to_string(),
            icon: IconTag::Heart,
            color: "rose".to_string(),
            metaphor: "Care City".to_string(),
            description: "Everything here is about helping people, health and caring.".to_string(),
            tags: tags(&["helping", "people", "caring", "kind", "doctor", "listening"]),
            jobs: vec![
                job(
                    "nurse",
                    "Nurse",
                    "You look after sick people in the hospital. You hand out medicine and make sure they feel comfortable.",
                    "Hospital Hill",
                ),
                job(
                    "doctor",
                    "Doctor",
                    "You examine what is wrong with people and come up with a plan to make them better.",
                    "Hospital Hill",
                ),
                job(
                    "homecare",
                    "Home Care Worker",
                    "You visit people at home to help them wash, get dressed and get through the day.",
                    "Elder Quarter",
                ),
                job(
                    "pedagogue",
                    "Childcare Worker",
                    "You work with children at daycare or school and make sure everyone feels at ease.",
                    "Children's Square",
                ),
            ],
        },
        Route {
            id: "tech".to_string(),
            title: "Technology & Making Things".to_string(),
            icon: IconTag::Gear,
            color: "blue".to_string(),
            metaphor: "Tech Island".to_string(),
            description: "For the makers, the builders and the inventors.".to_string(),
            tags: tags(&["hands", "building", "lego", "repair", "technology", "cars"]),
            jobs: vec![
                job(
                    "mechanic",
                    "Car Mechanic",
                    "You repair cars and make sure they are safe to drive.",
                    "The Garage",
                ),
                job(
                    "programmer",
                    "Programmer",
                    "You write computer code to build apps, websites and games.",
                    "Digi Lab",
                ),
                job(
                    "carpenter",
                    "Carpenter",
                    "You build houses, furniture and roofs out of wood.",
                    "Construction Site",
                ),
                job(
                    "electrician",
                    "Electrician",
                    "You make sure the lights stay on and the power keeps flowing everywhere.",
                    "Power Station",
                ),
            ],
        },
        Route {
            id: "art".to_string(),
            title: "Art & Creativity".to_string(),
            icon: IconTag::Brush,
            color: "purple".to_string(),
            metaphor: "Creative Island".to_string(),
            description: "Let your imagination run free. Dance, music, images and design.".to_string(),
            tags: tags(&["drawing", "crafts", "music", "creative", "imagination", "design"]),
            jobs: vec![
                job(
                    "designer",
                    "Graphic Designer",
                    "You design posters, logos and websites on the computer.",
                    "Design Studio",
                ),
                job(
                    "actor",
                    "Actor",
                    "You play characters in films, series or at the theatre.",
                    "Theatre Square",
                ),
                job(
                    "hairdresser",
                    "Hairdresser",
                    "You cut and colour hair so people look their best.",
                    "Fashion Street",
                ),
                job(
                    "photographer",
                    "Photographer",
                    "You take beautiful pictures of people, nature or things.",
                    "Media City",
                ),
            ],
        },
        Route {
            id: "business".to_string(),
            title: "Money, Trade & Organizing".to_string(),
            icon: IconTag::Money,
            color: "yellow".to_string(),
            metaphor: "Trade Town".to_string(),
            description: "Arranging, selling, working with numbers and starting things.".to_string(),
            tags: tags(&["shop", "numbers", "organizing", "selling", "money", "leading"]),
            jobs: vec![
                job(
                    "shopkeeper",
                    "Shop Assistant",
                    "You help customers in the shop and keep the shelves stocked.",
                    "Shopping Centre",
                ),
                job(
                    "manager",
                    "Manager",
                    "You lead a team and make sure everyone can do their job well.",
                    "Office Tower",
                ),
                job(
                    "accountant",
                    "Accountant",
                    "You keep exact track of how much money comes in and goes out.",
                    "The Bank",
                ),
                job(
                    "entrepreneur",
                    "Entrepreneur",
                    "You start your own company and come up with new ideas.",
                    "Start-up Garage",
                ),
            ],
        },
        Route {
            id: "nature".to_string(),
            title: "Nature, Research & the Environment".to_string(),
            icon: IconTag::Leaf,
            color: "green".to_string(),
            metaphor: "Green Valley".to_string(),
            description: "Working with animals, plants, the earth or in the lab.".to_string(),
            tags: tags(&["animals", "outdoors", "nature", "research", "plants", "biology"]),
            jobs: vec![
                job(
                    "vet",
                    "Veterinary Assistant",
                    "You help the vet make sick animals better again.",
                    "Animal Clinic",
                ),
                job(
                    "gardener",
                    "Gardener",
                    "You lay out gardens and take care of plants and trees.",
                    "Parks & Gardens",
                ),
                job(
                    "researcher",
                    "Researcher",
                    "You run experiments in a laboratory to discover new things.",
                    "Science Lab",
                ),
                job(
                    "farmer",
                    "Farmer",
                    "You look after cows and pigs, or grow vegetables on the land.",
                    "The Farm",
                ),
            ],
        },
        Route {
            id: "society".to_string(),
            title: "Language, People & Community".to_string(),
            icon: IconTag::Speech,
            color: "orange".to_string(),
            metaphor: "Community Centre".to_string(),
            description: "Safety, law, travel and bringing people together.".to_string(),
            tags: tags(&["talking", "people", "safety", "language", "travel", "together"]),
            jobs: vec![
                job(
                    "police",
                    "Police Officer",
                    "You keep the streets safe and help people in trouble.",
                    "Safety Square",
                ),
                job(
                    "lawyer",
                    "Lawyer",
                    "You help people with laws and rules when they run into problems.",
                    "The Courthouse",
                ),
                job(
                    "guide",
                    "Tour Guide",
                    "You show tourists beautiful places and tell them all about them.",
                    "Tourist Office",
                ),
                job(
                    "socialworker",
                    "Social Worker",
                    "You support people who are struggling at home or with money.",
                    "Neighbourhood House",
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::QUESTIONS;

    #[test]
    fn test_catalog_shape() {
        let routes = catalog();
        assert_eq!(routes.len(), 6);
        for route in &routes {
            assert_eq!(route.jobs.len(), 4, "route {} should have 4 jobs", route.id);
            assert!(!route.tags.is_empty());
            assert!(!route.description.is_empty());
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let routes = catalog();
        let mut route_ids: Vec<&str> = routes.iter().map(|r| r.id.as_str()).collect();
        route_ids.sort();
        route_ids.dedup();
        assert_eq!(route_ids.len(), 6);

        let mut job_ids: Vec<&str> = routes
            .iter()
            .flat_map(|r| r.jobs.iter().map(|j| j.id.as_str()))
            .collect();
        let total = job_ids.len();
        job_ids.sort();
        job_ids.dedup();
        assert_eq!(job_ids.len(), total, "job ids must be unique across routes");
    }

    #[test]
    fn test_tags_are_lowercase() {
        for route in catalog() {
            for tag in &route.tags {
                assert_eq!(tag, &tag.to_lowercase(), "tag '{}' in {}", tag, route.id);
            }
        }
    }

    #[test]
    fn test_every_route_is_reachable_from_question_options() {
        // Selecting the right predefined options must be enough to get a
        // route suggested; every route needs at least one tag that occurs
        // in some option text.
        for route in catalog() {
            let reachable = QUESTIONS.iter().any(|q| {
                q.options.iter().any(|opt| {
                    let opt = opt.to_lowercase();
                    route.tags.iter().any(|tag| opt.contains(tag.as_str()))
                })
            });
            assert!(reachable, "route {} has no tag matching any option", route.id);
        }
    }

    #[test]
    fn test_zones_keep_encounter_order() {
        let routes = catalog();
        let care = route_by_id(&routes, "care").unwrap();
        assert_eq!(
            care.zones(),
            vec!["Hospital Hill", "Elder Quarter", "Children's Square"]
        );
        assert_eq!(care.jobs_in_zone("Hospital Hill").len(), 2);
    }

    #[test]
    fn test_find_job() {
        let routes = catalog();
        let (route, job) = find_job(&routes, "programmer").unwrap();
        assert_eq!(route.id, "tech");
        assert_eq!(job.title, "Programmer");
        assert!(find_job(&routes, "astronaut").is_none());
        assert_eq!(job_title(&routes, "astronaut"), "astronaut");
    }

    #[test]
    fn test_route_titles_follow_catalog_order() {
        let routes = catalog();
        // A score map hands out ids in arbitrary order; the titles
        // still come out in catalog order.
        let titles = route_titles(&routes, &["society", "care"]);
        assert_eq!(
            titles,
            vec!["Care & Helping People", "Language, People & Community"]
        );
        assert!(route_titles(&routes, &["atlantis"]).is_empty());
    }
}
