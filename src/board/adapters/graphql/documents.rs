//! GraphQL documents sent to the board service.

pub const LIST_PROJECTS: &str = r"
query GetProjects($orgSlug: String!) {
  projects(orgSlug: $orgSlug) {
    id
    name
    description
    status
    taskCount
    completedTaskCount
  }
}
";

pub const CREATE_PROJECT: &str = r"
mutation CreateProject($orgSlug: String!, $name: String!, $description: String!) {
  createProject(orgSlug: $orgSlug, name: $name, description: $description) {
    project { id }
  }
}
";

pub const GET_PROJECT: &str = r"
query GetProjectDetails($id: ID!) {
  project(id: $id) {
    id
    name
    description
    status
    dueDate
    tasks {
      id
      title
      description
      status
      assigneeEmail
      dueDate
      comments {
        id
        content
        authorEmail
        createdAt
      }
    }
  }
}
";

pub const GET_TASK: &str = r"
query GetTask($id: ID!) {
  task(id: $id) {
    id
    title
    description
    status
    assigneeEmail
    dueDate
    comments {
      id
      content
      authorEmail
      createdAt
    }
  }
}
";

pub const CREATE_TASK: &str = r"
mutation CreateTask($projectId: ID!, $title: String!, $assigneeEmail: String!) {
  createTask(projectId: $projectId, title: $title, assigneeEmail: $assigneeEmail) {
    task { id title status }
  }
}
";

pub const UPDATE_TASK_STATUS: &str = r"
mutation UpdateTaskStatus($taskId: ID!, $status: String!) {
  updateTaskStatus(taskId: $taskId, status: $status) {
    task { id status }
  }
}
";

pub const UPDATE_PROJECT_STATUS: &str = r"
mutation UpdateProjectStatus($projectId: ID!, $status: String!) {
  updateProjectStatus(projectId: $projectId, status: $status) {
    project { id status }
  }
}
";

pub const ADD_COMMENT: &str = r"
mutation AddComment($taskId: ID!, $content: String!, $authorEmail: String!) {
  addComment(taskId: $taskId, content: $content, authorEmail: $authorEmail) {
    comment { id content createdAt }
  }
}
";

pub const UPDATE_PROJECT_DETAILS: &str = r"
mutation UpdateProjectDetails(
  $projectId: ID!, $name: String, $description: String, $dueDate: Date
) {
  updateProjectDetails(
    projectId: $projectId, name: $name, description: $description, dueDate: $dueDate
  ) {
    project { id name description status dueDate }
  }
}
";

pub const UPDATE_TASK_DETAILS: &str = r"
mutation UpdateTaskDetails(
  $taskId: ID!, $title: String, $description: String, $assigneeEmail: String,
  $dueDate: DateTime
) {
  updateTaskDetails(
    taskId: $taskId, title: $title, description: $description,
    assigneeEmail: $assigneeEmail, dueDate: $dueDate
  ) {
    task { id title description status assigneeEmail dueDate }
  }
}
";
