//! 用户业务服务
//!
//! `UserService` 持有进程内的用户集合，所有操作都在一次加锁内完成，
//! 因此并发请求对集合的修改是串行的。

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use super::model::{seed_users, CreateUserRequest, UpdateUserRequest, User, UserId};
use crate::config::{IdStrategy, UsersConfig};
use crate::core::error::CoreError;

#[derive(Debug)]
struct UserStore {
    users: Vec<User>,
    /// 下一个顺序 id，只在创建时递增
    next_id: i64,
    strategy: IdStrategy,
}

impl UserStore {
    fn allocate_id(&mut self) -> i64 {
        match self.strategy {
            IdStrategy::Sequential => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            IdStrategy::CollectionLength => {
                let id = self.users.len() as i64 + 1;
                self.next_id = self.next_id.max(id + 1);
                id
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<Mutex<UserStore>>,
}

impl UserService {
    /// 使用给定的初始用户创建服务
    pub fn with_users(users: Vec<User>, strategy: IdStrategy) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;

        Self {
            store: Arc::new(Mutex::new(UserStore {
                users,
                next_id,
                strategy,
            })),
        }
    }

    /// 空集合
    pub fn new(strategy: IdStrategy) -> Self {
        Self::with_users(Vec::new(), strategy)
    }

    /// 带四条示例用户
    pub fn seeded(strategy: IdStrategy) -> Self {
        Self::with_users(seed_users(), strategy)
    }

    pub fn from_config(config: &UsersConfig) -> Self {
        if config.seed {
            Self::seeded(config.id_strategy)
        } else {
            Self::new(config.id_strategy)
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserStore>, CoreError> {
        self.store
            .lock()
            .map_err(|e| CoreError::InternalServerError(format!("用户集合锁已损坏: {e}")))
    }

    /// 按集合顺序返回所有用户
    pub fn list_users(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.lock()?.users.clone())
    }

    /// 创建用户并追加到集合末尾
    ///
    /// 缺失或为 null 的字段保存为 null，不做校验。
    pub fn create_user(&self, req: CreateUserRequest) -> Result<User, CoreError> {
        let mut store = self.lock()?;

        let user = User {
            id: store.allocate_id(),
            name: req.name.into_value(),
            age: req.age.into_value(),
            hobby: req.hobby.into_value(),
        };
        store.users.push(user.clone());

        debug!(id = user.id, total = store.users.len(), "用户已创建");
        Ok(user)
    }

    /// 更新第一个 id 匹配的用户，只替换提供了真值的字段
    pub fn update_user(&self, id: UserId, req: UpdateUserRequest) -> Result<User, CoreError> {
        let mut store = self.lock()?;

        let user = store
            .users
            .iter_mut()
            .find(|u| id.matches(u.id))
            .ok_or_else(|| CoreError::NotFound(format!("User with id {id} not found")))?;

        req.name.apply_to(&mut user.name);
        req.age.apply_to(&mut user.age);
        req.hobby.apply_to(&mut user.hobby);

        debug!(%id, "用户已更新");
        Ok(user.clone())
    }

    /// 删除所有 id 匹配的用户，返回删除数量；没有匹配时不算错误
    pub fn delete_user(&self, id: UserId) -> Result<usize, CoreError> {
        let mut store = self.lock()?;

        let before = store.users.len();
        store.users.retain(|u| !id.matches(u.id));
        let removed = before - store.users.len();

        debug!(%id, removed, "删除用户");
        Ok(removed)
    }
}
