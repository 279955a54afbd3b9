mod external_data;
mod sync_status;
mod task_priority;
