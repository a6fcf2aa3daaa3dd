use microblog_models::{AnonymousUser, AuthUser};

/// The principal behind a request.
#[derive(Debug, Clone)]
pub enum CurrentUser<U> {
    Authenticated(U),
    Anonymous,
}

impl<U> CurrentUser<U> {
    pub fn user(&self) -> Option<&U> {
        match self {
            CurrentUser::Authenticated(user) => Some(user),
            CurrentUser::Anonymous => None,
        }
    }

    pub fn into_user(self) -> Option<U> {
        match self {
            CurrentUser::Authenticated(user) => Some(user),
            CurrentUser::Anonymous => None,
        }
    }
}

impl<U: AuthUser> AuthUser for CurrentUser<U> {
    fn get_id(&self) -> Option<String> {
        match self {
            CurrentUser::Authenticated(user) => user.get_id(),
            CurrentUser::Anonymous => AnonymousUser.get_id(),
        }
    }

    fn is_authenticated(&self) -> bool {
        match self {
            CurrentUser::Authenticated(user) => user.is_authenticated(),
            CurrentUser::Anonymous => AnonymousUser.is_authenticated(),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            CurrentUser::Authenticated(user) => user.is_active(),
            CurrentUser::Anonymous => AnonymousUser.is_active(),
        }
    }

    fn is_anonymous(&self) -> bool {
        match self {
            CurrentUser::Authenticated(user) => user.is_anonymous(),
            CurrentUser::Anonymous => AnonymousUser.is_anonymous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microblog_models::User;

    #[test]
    fn test_forwards_predicates() {
        let user = User::from_stored(3, "dave".into(), "dave@example.com".into(), String::new());
        let current = CurrentUser::Authenticated(user);
        assert_eq!(current.get_id().as_deref(), Some("3"));
        assert!(current.is_authenticated());
        assert!(current.is_active());
        assert!(!current.is_anonymous());
        assert_eq!(current.into_user().map(|u| u.username), Some("dave".to_string()));

        let anon: CurrentUser<User> = CurrentUser::Anonymous;
        assert_eq!(anon.get_id(), None);
        assert!(!anon.is_authenticated());
        assert!(anon.is_anonymous());
        assert!(anon.user().is_none());
    }
}
