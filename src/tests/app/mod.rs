mod console_flow_tests;
