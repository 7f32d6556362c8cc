//! Documents understood by the Lucky Spin GraphQL server.

pub const GET_NAMES: &str = r#"
  query GetNames($spinListId: ID!) {
    getNames(spinListId: $spinListId) {
      id
      value
    }
  }
"#;

pub const ADD_NAME: &str = r#"
  mutation AddName($spinListId: ID!, $value: String!) {
    addName(spinListId: $spinListId, value: $value) {
      id
      value
    }
  }
"#;

pub const CLEAR_NAMES: &str = r#"
  mutation ClearNames($spinListId: ID!) {
    clearNames(spinListId: $spinListId)
  }
"#;

pub const GET_USERS: &str = r#"
  query GetUsers {
    getUsers {
      id
      username
    }
  }
"#;

pub const CREATE_USER: &str = r#"
  mutation CreateUser($username: String!) {
    createUser(username: $username) {
      id
      username
    }
  }
"#;

pub const GET_SPIN_LISTS: &str = r#"
  query GetSpinLists {
    getSpinLists {
      id
      title
      user {
        id
        username
      }
    }
  }
"#;

pub const CREATE_SPIN_LIST: &str = r#"
  mutation CreateSpinList($userId: ID!, $title: String!) {
    createSpinList(userId: $userId, title: $title) {
      id
      title
      user {
        id
        username
      }
    }
  }
"#;
