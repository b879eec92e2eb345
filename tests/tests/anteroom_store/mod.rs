mod disk_store;
