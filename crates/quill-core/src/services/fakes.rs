//! In-memory port implementations for use-case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewPost, NewUser, Post, PostWithAuthor, User};
use crate::error::RepoError;
use crate::ports::{AuthError, BaseRepository, PasswordService, PostRepository, UserRepository};

pub fn user(id: i32, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        password_hash: String::new(),
        created: Utc::now(),
    }
}

/// Reversible "hash" that is obviously not the plain password.
pub struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("fake${}", password.chars().rev().collect::<String>()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(self.hash(password)? == hash)
    }
}

#[derive(Default)]
pub struct FakeUsers {
    users: Mutex<Vec<User>>,
    reject_inserts: bool,
}

impl FakeUsers {
    /// Make every insert fail as if the unique index was hit.
    pub fn reject_inserts(mut self) -> Self {
        self.reject_inserts = true;
        self
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseRepository<User, i32> for FakeUsers {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn create(&self, new: NewUser) -> Result<User, RepoError> {
        if self.reject_inserts {
            return Err(RepoError::Constraint("username".to_string()));
        }
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: users.len() as i32 + 1,
            username: new.username,
            password_hash: new.password_hash,
            created: new.created,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[derive(Default)]
pub struct FakePosts {
    posts: Mutex<Vec<Post>>,
    authors: Vec<User>,
}

impl FakePosts {
    pub fn with_authors(authors: Vec<User>) -> Self {
        Self {
            posts: Mutex::default(),
            authors,
        }
    }

    pub fn insert(&self, new: NewPost) -> Post {
        let mut posts = self.posts.lock().unwrap();
        let post = Post {
            id: posts.len() as i32 + 1,
            author_id: new.author_id,
            created: new.created,
            title: new.title,
            body: new.body,
        };
        posts.push(post.clone());
        post
    }

    fn join(&self, post: Post) -> Result<PostWithAuthor, RepoError> {
        let author = self
            .authors
            .iter()
            .find(|u| u.id == post.author_id)
            .ok_or(RepoError::NotFound)?
            .author();
        Ok(PostWithAuthor { post, author })
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for FakePosts {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.posts.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for FakePosts {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        Ok(self.insert(post))
    }

    async fn list_recent(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        posts.into_iter().map(|p| self.join(p)).collect()
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let post = self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned();
        post.map(|p| self.join(p)).transpose()
    }
}
