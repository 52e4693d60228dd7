//! Deterministic fixture data shaped like the public demo API.
//!
//! Ten users with fixed profiles; posts, todos, albums and comments are
//! generated from their ids so every run serves identical data.

use serde::{Deserialize, Serialize};

pub const USERS: u32 = 10;
pub const POSTS: u32 = 100;
pub const TODOS: u32 = 200;
pub const ALBUMS: u32 = 100;
pub const COMMENTS: u32 = 500;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub website: String,
    pub company: Company,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub post_id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// All collections, built once per server.
#[derive(Clone, Debug)]
pub struct Fixtures {
    pub posts: Vec<Post>,
    pub users: Vec<User>,
    pub todos: Vec<Todo>,
    pub albums: Vec<Album>,
    pub comments: Vec<Comment>,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            posts: posts(),
            users: users(),
            todos: todos(),
            albums: albums(),
            comments: comments(),
        }
    }
}

const WORDS: [&str; 32] = [
    "sunt", "aut", "facere", "repellat", "provident", "occaecati", "excepturi", "optio",
    "reprehenderit", "qui", "est", "esse", "ea", "molestias", "quasi", "exercitationem",
    "eum", "et", "iusto", "sed", "quo", "dolorem", "magnam", "nesciunt", "quis", "nam",
    "facilis", "officia", "delectus", "autem", "fugiat", "veniam",
];

/// `len` pseudo-latin words derived from `seed`.
fn phrase(seed: u32, len: u32) -> String {
    (0..len)
        .map(|i| WORDS[((seed * 31 + i * 17 + seed / 7) as usize) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn owner(id: u32, per_user: u32) -> u32 {
    (id - 1) / per_user + 1
}

pub fn posts() -> Vec<Post> {
    (1..=POSTS)
        .map(|id| Post {
            id,
            user_id: owner(id, POSTS / USERS),
            title: phrase(id, 3 + id % 5),
            body: phrase(id + 1000, 20),
        })
        .collect()
}

pub fn todos() -> Vec<Todo> {
    (1..=TODOS)
        .map(|id| Todo {
            id,
            user_id: owner(id, TODOS / USERS),
            title: phrase(id + 2000, 2 + id % 4),
            completed: id % 3 != 1,
        })
        .collect()
}

pub fn albums() -> Vec<Album> {
    (1..=ALBUMS)
        .map(|id| Album {
            id,
            user_id: owner(id, ALBUMS / USERS),
            title: phrase(id + 3000, 2 + id % 3),
        })
        .collect()
}

pub fn comments() -> Vec<Comment> {
    (1..=COMMENTS)
        .map(|id| Comment {
            id,
            post_id: owner(id, COMMENTS / POSTS),
            name: phrase(id + 4000, 4),
            email: format!("{}@example.{}", WORDS[id as usize % WORDS.len()], ["biz", "org", "net"][id as usize % 3]),
            body: phrase(id + 5000, 12),
        })
        .collect()
}

struct Profile {
    name: &'static str,
    username: &'static str,
    email: &'static str,
    street: &'static str,
    suite: &'static str,
    city: &'static str,
    zipcode: &'static str,
    geo: (&'static str, &'static str),
    phone: &'static str,
    website: &'static str,
    company: (&'static str, &'static str, &'static str),
}

const PROFILES: [Profile; USERS as usize] = [
    Profile {
        name: "Leanne Graham",
        username: "Bret",
        email: "Sincere@april.biz",
        street: "Kulas Light",
        suite: "Apt. 556",
        city: "Gwenborough",
        zipcode: "92998-3874",
        geo: ("-37.3159", "81.1496"),
        phone: "1-770-736-8031 x56442",
        website: "hildegard.org",
        company: ("Romaguera-Crona", "Multi-layered client-server neural-net", "harness real-time e-markets"),
    },
    Profile {
        name: "Ervin Howell",
        username: "Antonette",
        email: "Shanna@melissa.tv",
        street: "Victor Plains",
        suite: "Suite 879",
        city: "Wisokyburgh",
        zipcode: "90566-7771",
        geo: ("-43.9509", "-34.4618"),
        phone: "010-692-6593 x09125",
        website: "anastasia.net",
        company: ("Deckow-Crist", "Proactive didactic contingency", "synergize scalable supply-chains"),
    },
    Profile {
        name: "Clementine Bauch",
        username: "Samantha",
        email: "Nathan@yesenia.net",
        street: "Douglas Extension",
        suite: "Suite 847",
        city: "McKenziehaven",
        zipcode: "59590-4157",
        geo: ("-68.6102", "-47.0653"),
        phone: "1-463-123-4447",
        website: "ramiro.info",
        company: ("Romaguera-Jacobson", "Face to face bifurcated interface", "e-enable strategic applications"),
    },
    Profile {
        name: "Patricia Lebsack",
        username: "Karianne",
        email: "Julianne.OConner@kory.org",
        street: "Hoeger Mall",
        suite: "Apt. 692",
        city: "South Elvis",
        zipcode: "53919-4257",
        geo: ("29.4572", "-164.2990"),
        phone: "493-170-9623 x156",
        website: "kale.biz",
        company: ("Robel-Corkery", "Multi-tiered zero tolerance productivity", "transition cutting-edge web services"),
    },
    Profile {
        name: "Chelsey Dietrich",
        username: "Kamren",
        email: "Lucio_Hettinger@annie.ca",
        street: "Skiles Walks",
        suite: "Suite 351",
        city: "Roscoeview",
        zipcode: "33263",
        geo: ("-31.8129", "62.5342"),
        phone: "(254)954-1289",
        website: "demarco.info",
        company: ("Keebler LLC", "User-centric fault-tolerant solution", "revolutionize end-to-end systems"),
    },
    Profile {
        name: "Mrs. Dennis Schulist",
        username: "Leopoldo_Corkery",
        email: "Karley_Dach@jasper.info",
        street: "Norberto Crossing",
        suite: "Apt. 950",
        city: "South Christy",
        zipcode: "23505-1337",
        geo: ("-71.4197", "71.7478"),
        phone: "1-477-935-8478 x6430",
        website: "ola.org",
        company: ("Considine-Lockman", "Synchronised bottom-line interface", "e-enable innovative applications"),
    },
    Profile {
        name: "Kurtis Weissnat",
        username: "Elwyn.Skiles",
        email: "Telly.Hoeger@billy.biz",
        street: "Rex Trail",
        suite: "Suite 280",
        city: "Howemouth",
        zipcode: "58804-1099",
        geo: ("24.8918", "21.8984"),
        phone: "210.067.6132",
        website: "elvis.io",
        company: ("Johns Group", "Configurable multimedia task-force", "generate enterprise e-tailers"),
    },
    Profile {
        name: "Nicholas Runolfsdottir V",
        username: "Maxime_Nienow",
        email: "Sherwood@rosamond.me",
        street: "Ellsworth Summit",
        suite: "Suite 729",
        city: "Aliyaview",
        zipcode: "45169",
        geo: ("-14.3990", "-120.7677"),
        phone: "586.493.6943 x140",
        website: "jacynthe.com",
        company: ("Abernathy Group", "Implemented secondary concept", "e-enable extensible e-tailers"),
    },
    Profile {
        name: "Glenna Reichert",
        username: "Delphine",
        email: "Chaim_McDermott@dana.io",
        street: "Dayna Park",
        suite: "Suite 449",
        city: "Bartholomebury",
        zipcode: "76495-3109",
        geo: ("24.6463", "-168.8889"),
        phone: "(775)976-6794 x41206",
        website: "conrad.com",
        company: ("Yost and Sons", "Switchable contextually-based project", "aggregate real-time technologies"),
    },
    Profile {
        name: "Clementina DuBuque",
        username: "Moriah.Stanton",
        email: "Rey.Padberg@karina.biz",
        street: "Kattie Turnpike",
        suite: "Suite 198",
        city: "Lebsackbury",
        zipcode: "31428-2261",
        geo: ("-38.2386", "57.2232"),
        phone: "024-648-3804",
        website: "ambrose.net",
        company: ("Hoeger LLC", "Centralized empowering task-force", "target end-to-end models"),
    },
];

pub fn users() -> Vec<User> {
    PROFILES
        .iter()
        .zip(1..)
        .map(|(p, id)| User {
            id,
            name: p.name.to_string(),
            username: p.username.to_string(),
            email: p.email.to_string(),
            phone: p.phone.to_string(),
            address: Address {
                street: p.street.to_string(),
                suite: p.suite.to_string(),
                city: p.city.to_string(),
                zipcode: p.zipcode.to_string(),
                geo: Geo {
                    lat: p.geo.0.to_string(),
                    lng: p.geo.1.to_string(),
                },
            },
            website: p.website.to_string(),
            company: Company {
                name: p.company.0.to_string(),
                catch_phrase: p.company.1.to_string(),
                bs: p.company.2.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collections_have_expected_sizes_and_ids() {
        let data = Fixtures::default();
        assert_eq!(data.posts.len(), POSTS as usize);
        assert_eq!(data.users.len(), USERS as usize);
        assert_eq!(data.todos.len(), TODOS as usize);
        assert_eq!(data.albums.len(), ALBUMS as usize);
        assert_eq!(data.comments.len(), COMMENTS as usize);
        assert!(data.todos.iter().zip(1..).all(|(t, id)| t.id == id));
    }

    #[test]
    fn every_foreign_key_resolves() {
        let data = Fixtures::default();
        assert!(data.posts.iter().all(|p| (1..=USERS).contains(&p.user_id)));
        assert!(data.comments.iter().all(|c| (1..=POSTS).contains(&c.post_id)));
        assert_eq!(data.comments.iter().filter(|c| c.post_id == 3).count(), 5);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(posts(), posts());
        assert_eq!(users()[1].name, "Ervin Howell");
    }

    #[test]
    fn user_serializes_camel_case() {
        let json = serde_json::to_value(&users()[0]).unwrap();
        assert_eq!(json["company"]["catchPhrase"], "Multi-layered client-server neural-net");
        assert_eq!(json["address"]["geo"]["lat"], "-37.3159");
    }
}
