//! Template sources keyed by name.

pub const DASHBOARD: &str = "dashboard";
pub const BOARD: &str = "board";
pub const TASK_DETAIL: &str = "task_detail";
pub const NOTICES: &str = "notices";

const DASHBOARD_SOURCE: &str = "\
Projects for {{ org }} ({{ projects | length }})
{% for project in projects %}
- {{ project.name }} [{{ project.status }}] {{ project.progress }}
  {{ project.description }}
  id: {{ project.id }}
{% else %}
No projects yet.
{% endfor %}";

const BOARD_SOURCE: &str = "\
{{ name }} [{{ status }}] {{ progress }}
{{ description }}
{% if due_date %}
Due: {{ due_date }}
{% endif %}
{% for column in columns %}

== {{ column.title }} ({{ column.count }}) ==
{% for task in column.tasks %}
  * {{ task.title }} <{{ task.assignee }}> [{{ task.comment_count }} comments] id: {{ task.id }}{% if column.moves %} (move: {{ column.moves }}){% endif %}

{% else %}
  (empty)
{% endfor %}
{% endfor %}";

const TASK_DETAIL_SOURCE: &str = "\
{{ title }} [{{ status }}]
Assignee: {{ assignee }}
{% if due_date %}
Due: {{ due_date }}
{% endif %}
{% if description %}
{{ description }}
{% endif %}

Comments ({{ comments | length }})
{% for comment in comments %}
  {{ comment.author }} at {{ comment.created_at }}: {{ comment.content }}
{% else %}
  No comments yet.
{% endfor %}";

const NOTICES_SOURCE: &str = "\
{% for notice in notices %}
! {{ notice.section }}: {{ notice.message }}
{% endfor %}";

pub const ALL: [(&str, &str); 4] = [
    (DASHBOARD, DASHBOARD_SOURCE),
    (BOARD, BOARD_SOURCE),
    (TASK_DETAIL, TASK_DETAIL_SOURCE),
    (NOTICES, NOTICES_SOURCE),
];
