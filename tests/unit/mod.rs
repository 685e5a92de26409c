// Tests for the extraction pipeline that need no database
